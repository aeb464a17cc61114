use crate::{
    database::connection::DbTransaction,
    models::{
        account::{Account, AccountError},
        student::{CreateStudent, Student},
        user::UserRole,
    },
    requests::register::{RegistrationData, StudentPayload},
    services::account::{AccountService, insert_user, parse_payload},
};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct StudentService;

impl StudentService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccountService<DbTransaction> for StudentService {
    async fn create_account(
        &self,
        tx: &mut DbTransaction,
        data: &RegistrationData,
    ) -> Result<Account, AccountError> {
        let payload: StudentPayload = parse_payload(data)?;
        let user = insert_user(tx, &payload.account, UserRole::Student).await?;

        let create_student = CreateStudent {
            user_id: user.id,
            date_of_birth: payload.date_of_birth,
            grade_level: payload.grade_level,
            parent_email: payload.parent_email.map(|e| e.trim().to_lowercase()),
        };

        let student = Student::create(&mut **tx, create_student)
            .await
            .map_err(AccountError::Database)?;

        info!("Created student profile {} for user {}", student.id, user.id);
        Ok(Account::for_profile(user, student.id))
    }
}
