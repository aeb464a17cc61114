use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Parent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateParent {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub occupation: Option<String>,
}

impl Parent {
    pub async fn create(conn: &mut PgConnection, parent: CreateParent) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let parent = sqlx::query_as::<_, Parent>(
            "INSERT INTO parents (id, user_id, phone, occupation, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
            .bind(Uuid::new_v4())
            .bind(parent.user_id)
            .bind(parent.phone)
            .bind(parent.occupation)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        Ok(parent)
    }
}
