use actix_web::{HttpResponse, web};

use crate::{
    database::transaction::{PgTransactionScope, TransactionScope},
    handlers,
    services::{
        account::AccountService, instructor::InstructorService, parent::ParentService,
        student::StudentService,
    },
};

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    registration_config::<PgTransactionScope, StudentService, ParentService, InstructorService>(cfg);
}

/// Mount the auth routes for a `RegistrationWorkflow<T, S, P, I>` held in app data.
pub fn registration_config<T, S, P, I>(cfg: &mut web::ServiceConfig)
where
    T: TransactionScope + 'static,
    S: AccountService<T::Tx> + 'static,
    P: AccountService<T::Tx> + 'static,
    I: AccountService<T::Tx> + 'static,
{
    cfg.service(
        web::scope("/auth").service(
            web::resource("/register")
                .route(web::post().to(handlers::auth::register::<T, S, P, I>))
                .route(web::head().to(HttpResponse::MethodNotAllowed)),
        ),
    );
}
