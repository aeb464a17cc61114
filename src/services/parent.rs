use crate::{
    database::connection::DbTransaction,
    models::{
        account::{Account, AccountError},
        parent::{CreateParent, Parent},
        user::UserRole,
    },
    requests::register::{ParentPayload, RegistrationData},
    services::account::{AccountService, insert_user, parse_payload},
};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ParentService;

impl ParentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccountService<DbTransaction> for ParentService {
    async fn create_account(
        &self,
        tx: &mut DbTransaction,
        data: &RegistrationData,
    ) -> Result<Account, AccountError> {
        let payload: ParentPayload = parse_payload(data)?;
        let user = insert_user(tx, &payload.account, UserRole::Parent).await?;

        let create_parent = CreateParent {
            user_id: user.id,
            phone: payload.phone,
            occupation: payload.occupation,
        };

        let parent = Parent::create(&mut **tx, create_parent)
            .await
            .map_err(AccountError::Database)?;

        info!("Created parent profile {} for user {}", parent.id, user.id);
        Ok(Account::for_profile(user, parent.id))
    }
}
