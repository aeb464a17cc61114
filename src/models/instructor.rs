use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Instructor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateInstructor {
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

impl Instructor {
    pub async fn create(
        conn: &mut PgConnection,
        instructor: CreateInstructor,
    ) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let instructor = sqlx::query_as::<_, Instructor>(
            "INSERT INTO instructors (id, user_id, phone, specialization, qualification, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
            .bind(Uuid::new_v4())
            .bind(instructor.user_id)
            .bind(instructor.phone)
            .bind(instructor.specialization)
            .bind(instructor.qualification)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        Ok(instructor)
    }
}
