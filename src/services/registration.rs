//! Self-registration of students, parents and instructors.
//!
//! [`RegistrationWorkflow::register`] opens a transaction, hands the form
//! data to the collaborator for the selected role and finishes the
//! transaction with exactly one commit or rollback. Errors never escape;
//! they come back as [`RegistrationOutcome::Failure`].

use crate::{
    database::{
        connection::DbPool,
        transaction::{PgTransactionScope, TransactionScope},
    },
    models::account::{Account, AccountError},
    requests::register::RegistrationData,
    services::{
        account::AccountService, instructor::InstructorService, parent::ParentService,
        student::StudentService,
    },
};
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info, warn};

pub const REGISTRATION_SUCCESS_MESSAGE: &str =
    "Registration successful! Please check your email to verify your account.";

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid role selected: {role:?}")]
    InvalidRole { role: String },
    #[error(transparent)]
    Creation(#[from] AccountError),
    #[error("Transaction error: {0}")]
    Transaction(#[from] sqlx::Error),
}

/// Roles that may register themselves. Admins are provisioned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRole {
    Student,
    Parent,
    Instructor,
}

impl FromStr for RegistrationRole {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(RegistrationRole::Student),
            "parent" => Ok(RegistrationRole::Parent),
            "instructor" => Ok(RegistrationRole::Instructor),
            _ => Err(RegistrationError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Success {
        redirect_to: String,
        message: String,
        email: String,
    },
    Failure {
        error: String,
        old_input: Map<String, Value>,
    },
}

impl RegistrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Success { .. })
    }
}

pub struct RegistrationWorkflow<T, S, P, I> {
    transactions: T,
    students: S,
    parents: P,
    instructors: I,
    success_redirect: String,
}

pub type PgRegistrationWorkflow =
    RegistrationWorkflow<PgTransactionScope, StudentService, ParentService, InstructorService>;

impl PgRegistrationWorkflow {
    pub fn postgres(pool: DbPool, success_redirect: impl Into<String>) -> Self {
        RegistrationWorkflow::new(
            PgTransactionScope::new(pool),
            StudentService::new(),
            ParentService::new(),
            InstructorService::new(),
            success_redirect,
        )
    }
}

impl<T, S, P, I> RegistrationWorkflow<T, S, P, I>
where
    T: TransactionScope,
    S: AccountService<T::Tx>,
    P: AccountService<T::Tx>,
    I: AccountService<T::Tx>,
{
    pub fn new(
        transactions: T,
        students: S,
        parents: P,
        instructors: I,
        success_redirect: impl Into<String>,
    ) -> Self {
        Self {
            transactions,
            students,
            parents,
            instructors,
            success_redirect: success_redirect.into(),
        }
    }

    pub async fn register(&self, role: &str, data: RegistrationData) -> RegistrationOutcome {
        let mut tx = match self.transactions.begin().await {
            Ok(tx) => tx,
            Err(e) => {
                error!("Failed to begin registration transaction: {}", e);
                return self.failure(RegistrationError::Transaction(e), role, &data);
            }
        };

        match self.dispatch(&mut tx, role, &data).await {
            Ok(account) => {
                if let Err(e) = self.transactions.commit(tx).await {
                    error!("Failed to commit registration for {}: {}", account.email, e);
                    return self.failure(RegistrationError::Transaction(e), role, &data);
                }

                info!(
                    "Registered {} account {} ({})",
                    account.role, account.user_id, account.email
                );

                let email = data
                    .email()
                    .map(str::to_owned)
                    .unwrap_or(account.email);

                RegistrationOutcome::Success {
                    redirect_to: self.success_redirect.clone(),
                    message: REGISTRATION_SUCCESS_MESSAGE.to_string(),
                    email,
                }
            }
            Err(e) => {
                if let Err(rollback_error) = self.transactions.rollback(tx).await {
                    warn!("Failed to roll back registration: {}", rollback_error);
                }
                self.failure(e, role, &data)
            }
        }
    }

    async fn dispatch(
        &self,
        tx: &mut T::Tx,
        role: &str,
        data: &RegistrationData,
    ) -> Result<Account, RegistrationError> {
        let account = match role.parse::<RegistrationRole>()? {
            RegistrationRole::Student => self.students.create_account(tx, data).await?,
            RegistrationRole::Parent => self.parents.create_account(tx, data).await?,
            RegistrationRole::Instructor => self.instructors.create_account(tx, data).await?,
        };
        Ok(account)
    }

    fn failure(
        &self,
        error: RegistrationError,
        role: &str,
        data: &RegistrationData,
    ) -> RegistrationOutcome {
        error!("Registration failed for role {:?}: {}", role, error);
        RegistrationOutcome::Failure {
            error: error.to_string(),
            old_input: data.for_redisplay(role),
        }
    }
}
