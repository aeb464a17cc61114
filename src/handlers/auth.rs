use crate::{
    database::transaction::TransactionScope,
    requests::register::RegisterRequest,
    services::{
        account::AccountService,
        registration::{RegistrationOutcome, RegistrationWorkflow},
    },
    utils::helpers::ApiResponse,
};
use actix_web::{HttpResponse, Result, http::StatusCode, web};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct RegistrationSuccess {
    pub redirect_to: String,
    pub email: String,
}

pub async fn register<T, S, P, I>(
    workflow: web::Data<RegistrationWorkflow<T, S, P, I>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse>
where
    T: TransactionScope + 'static,
    S: AccountService<T::Tx> + 'static,
    P: AccountService<T::Tx> + 'static,
    I: AccountService<T::Tx> + 'static,
{
    let RegisterRequest { role, data } = request.into_inner();
    info!("Registration requested for role: {:?}", role);

    let outcome = workflow.register(&role, data).await;
    Ok(outcome_response(outcome))
}

pub fn outcome_response(outcome: RegistrationOutcome) -> HttpResponse {
    match outcome {
        RegistrationOutcome::Success {
            redirect_to,
            message,
            email,
        } => HttpResponse::Created().json(ApiResponse::success_with_message(
            RegistrationSuccess { redirect_to, email },
            message,
        )),
        RegistrationOutcome::Failure { error, old_input } => {
            ApiResponse::<()>::error_with_input(error, old_input)
                .to_response(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}
