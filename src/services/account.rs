use crate::{
    database::connection::DbTransaction,
    models::{
        account::{Account, AccountError},
        user::{CreateUser, User, UserRole},
    },
    requests::register::{AccountFields, RegistrationData, RegistrationPayload},
};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash};

/// Creates one kind of account inside the caller's transaction `Tx`.
#[async_trait]
pub trait AccountService<Tx: Send>: Send + Sync {
    async fn create_account(
        &self,
        tx: &mut Tx,
        data: &RegistrationData,
    ) -> Result<Account, AccountError>;
}

pub(crate) fn parse_payload<P: RegistrationPayload>(
    data: &RegistrationData,
) -> Result<P, AccountError> {
    let payload: P = data.parse()?;
    payload.validate()?;
    Ok(payload)
}

/// Insert the `users` row shared by every role.
pub(crate) async fn insert_user(
    tx: &mut DbTransaction,
    fields: &AccountFields,
    role: UserRole,
) -> Result<User, AccountError> {
    let email = fields.normalized_email();
    let create_user = CreateUser {
        name: fields.trimmed_name(),
        email: email.clone(),
        password_hash: hash(fields.password.as_bytes(), DEFAULT_COST)?,
        user_role: role,
    };

    User::create(&mut **tx, create_user)
        .await
        .map_err(|e| AccountError::from_insert(e, &email))
}
