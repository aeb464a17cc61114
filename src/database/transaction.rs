use crate::database::connection::{DbPool, DbTransaction};
use async_trait::async_trait;

/// Unit-of-work boundary used by the registration workflow.
///
/// Every `Tx` obtained from `begin` must be handed back to exactly one of
/// `commit` or `rollback`.
#[async_trait]
pub trait TransactionScope: Send + Sync {
    type Tx: Send;

    async fn begin(&self) -> Result<Self::Tx, sqlx::Error>;

    async fn commit(&self, tx: Self::Tx) -> Result<(), sqlx::Error>;

    async fn rollback(&self, tx: Self::Tx) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgTransactionScope {
    pool: DbPool,
}

impl PgTransactionScope {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionScope for PgTransactionScope {
    type Tx = DbTransaction;

    async fn begin(&self) -> Result<DbTransaction, sqlx::Error> {
        self.pool.begin().await
    }

    async fn commit(&self, tx: DbTransaction) -> Result<(), sqlx::Error> {
        tx.commit().await
    }

    async fn rollback(&self, tx: DbTransaction) -> Result<(), sqlx::Error> {
        tx.rollback().await
    }
}
