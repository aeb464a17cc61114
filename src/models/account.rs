use crate::models::user::{User, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid registration data: {0}")]
    InvalidData(#[from] serde_json::Error),
    #[error("The email {email} has already been taken")]
    DuplicateEmail { email: String },
    #[error("Failed to hash password: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl AccountError {
    /// Classify a driver error raised while inserting the account for `email`.
    pub fn from_insert(error: sqlx::Error, email: &str) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => AccountError::DuplicateEmail {
                email: email.to_string(),
            },
            _ => AccountError::Database(error),
        }
    }
}

/// A user together with the role profile created for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn for_profile(user: User, profile_id: Uuid) -> Self {
        Self {
            user_id: user.id,
            profile_id,
            role: user.user_role,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
