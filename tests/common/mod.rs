//! In-memory transaction scope and account services for driving the
//! registration workflow without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use edulink::{
    database::transaction::TransactionScope,
    models::{
        account::{Account, AccountError},
        user::UserRole,
    },
    requests::register::RegistrationData,
    services::{
        account::AccountService,
        registration::RegistrationWorkflow,
    },
};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
pub struct Ledger {
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub accounts: Vec<Account>,
}

/// In-memory store: writes are staged on the transaction and only land
/// in the ledger on commit.
#[derive(Clone, Default)]
pub struct FakeScope {
    pub ledger: Arc<Mutex<Ledger>>,
    pub fail_begin: bool,
    pub fail_commit: bool,
}

pub struct FakeTx {
    pub staged: Vec<Account>,
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FakeScope {
    pub fn snapshot(&self) -> (usize, usize, usize, Vec<Account>) {
        let ledger = self.ledger.lock().unwrap();
        (
            ledger.begins,
            ledger.commits,
            ledger.rollbacks,
            ledger.accounts.clone(),
        )
    }
}

#[async_trait]
impl TransactionScope for FakeScope {
    type Tx = FakeTx;

    async fn begin(&self) -> Result<FakeTx, sqlx::Error> {
        if self.fail_begin {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.ledger.lock().unwrap().begins += 1;
        Ok(FakeTx {
            staged: Vec::new(),
            ledger: self.ledger.clone(),
        })
    }

    async fn commit(&self, tx: FakeTx) -> Result<(), sqlx::Error> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.commits += 1;
        if self.fail_commit {
            return Err(sqlx::Error::WorkerCrashed);
        }
        ledger.accounts.extend(tx.staged);
        Ok(())
    }

    async fn rollback(&self, _tx: FakeTx) -> Result<(), sqlx::Error> {
        self.ledger.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Succeed,
    RejectTakenEmail,
    Fail(&'static str),
    StageThenFail(&'static str),
}

#[derive(Clone)]
pub struct FakeService {
    pub role: UserRole,
    pub behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
}

impl FakeService {
    pub fn new(role: UserRole, behavior: Behavior) -> Self {
        Self {
            role,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn account(&self, data: &RegistrationData) -> Account {
        Account {
            user_id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            role: self.role,
            name: "Test".to_string(),
            email: data.email().unwrap_or("fallback@x.com").to_string(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl AccountService<FakeTx> for FakeService {
    async fn create_account(
        &self,
        tx: &mut FakeTx,
        data: &RegistrationData,
    ) -> Result<Account, AccountError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => {}
            Behavior::RejectTakenEmail => {
                let email = data.email().unwrap_or_default().to_string();
                let taken = tx
                    .ledger
                    .lock()
                    .unwrap()
                    .accounts
                    .iter()
                    .any(|a| a.email == email);
                if taken {
                    return Err(AccountError::DuplicateEmail { email });
                }
            }
            Behavior::Fail(message) => return Err(AccountError::Validation(message.into())),
            Behavior::StageThenFail(message) => {
                tx.staged.push(self.account(data));
                return Err(AccountError::Validation(message.into()));
            }
        }
        let account = self.account(data);
        tx.staged.push(account.clone());
        Ok(account)
    }
}

pub struct Harness {
    pub scope: FakeScope,
    pub student: FakeService,
    pub parent: FakeService,
    pub instructor: FakeService,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            scope: FakeScope::default(),
            student: FakeService::new(UserRole::Student, Behavior::Succeed),
            parent: FakeService::new(UserRole::Parent, Behavior::Succeed),
            instructor: FakeService::new(UserRole::Instructor, Behavior::Succeed),
        }
    }

    pub fn workflow(&self) -> RegistrationWorkflow<FakeScope, FakeService, FakeService, FakeService> {
        RegistrationWorkflow::new(
            self.scope.clone(),
            self.student.clone(),
            self.parent.clone(),
            self.instructor.clone(),
            "/register/success",
        )
    }

    pub fn total_calls(&self) -> usize {
        self.student.calls() + self.parent.calls() + self.instructor.calls()
    }
}

pub fn form(value: Value) -> RegistrationData {
    match value {
        Value::Object(fields) => fields.into(),
        other => panic!("expected an object, got {other}"),
    }
}

pub fn sample_form(email: &str) -> RegistrationData {
    form(json!({
        "name": "Ada",
        "email": email,
        "password": "correct horse",
        "password_confirmation": "correct horse",
    }))
}
