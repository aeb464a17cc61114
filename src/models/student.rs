use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date_of_birth: Option<NaiveDate>,
    pub grade_level: Option<String>,
    pub parent_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateStudent {
    pub user_id: Uuid,
    pub date_of_birth: Option<NaiveDate>,
    pub grade_level: Option<String>,
    pub parent_email: Option<String>,
}

impl Student {
    pub async fn create(conn: &mut PgConnection, student: CreateStudent) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let student = sqlx::query_as::<_, Student>(
            "INSERT INTO students (id, user_id, date_of_birth, grade_level, parent_email, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
            .bind(Uuid::new_v4())
            .bind(student.user_id)
            .bind(student.date_of_birth)
            .bind(student.grade_level)
            .bind(student.parent_email)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *conn)
            .await?;

        Ok(student)
    }
}
