use crate::{
    database::connection::DbTransaction,
    models::{
        account::{Account, AccountError},
        instructor::{CreateInstructor, Instructor},
        user::UserRole,
    },
    requests::register::{InstructorPayload, RegistrationData},
    services::account::{AccountService, insert_user, parse_payload},
};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct InstructorService;

impl InstructorService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccountService<DbTransaction> for InstructorService {
    async fn create_account(
        &self,
        tx: &mut DbTransaction,
        data: &RegistrationData,
    ) -> Result<Account, AccountError> {
        let payload: InstructorPayload = parse_payload(data)?;
        let user = insert_user(tx, &payload.account, UserRole::Instructor).await?;

        let create_instructor = CreateInstructor {
            user_id: user.id,
            phone: payload.phone,
            specialization: payload.specialization,
            qualification: payload.qualification,
        };

        let instructor = Instructor::create(&mut **tx, create_instructor)
            .await
            .map_err(AccountError::Database)?;

        info!(
            "Created instructor profile {} for user {}",
            instructor.id, user.id
        );
        Ok(Account::for_profile(user, instructor.id))
    }
}
