// ============================================================================
// Edubloc Infrastructure - PostgreSQL Student Repository
// File: crates/edubloc-infrastructure/src/database/postgres/student_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use edubloc_core::domain::Student;
use edubloc_core::error::DomainError;
use edubloc_core::repositories::StudentRepository;

/// Student rows inside one tenant database. Constructed per request
/// by the scoped provider, bound to that tenant's pooled connection.
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub guardian_email: String,
    pub class_label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            name: row.name,
            guardian_email: row.guardian_email,
            class_label: row.class_label,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Student>, DomainError> {
        let row: Option<StudentRow> = sqlx::query_as(
            r#"
            SELECT id, name, guardian_email, class_label, created_at, updated_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding student by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_guardian_email(&self, email: &str) -> Result<Vec<Student>, DomainError> {
        let rows: Vec<StudentRow> = sqlx::query_as(
            r#"
            SELECT id, name, guardian_email, class_label, created_at, updated_at
            FROM students
            WHERE LOWER(guardian_email) = LOWER($1)
            ORDER BY name
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding students by guardian: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, student: &Student) -> Result<Student, DomainError> {
        let row: StudentRow = sqlx::query_as(
            r#"
            INSERT INTO students (id, name, guardian_email, class_label, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, guardian_email, class_label, created_at, updated_at
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.guardian_email)
        .bind(&student.class_label)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating student: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn update(&self, student: &Student) -> Result<Student, DomainError> {
        // The row may have been deleted since the caller loaded it.
        let row: Option<StudentRow> = sqlx::query_as(
            r#"
            UPDATE students
            SET name = $2, guardian_email = $3, class_label = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, name, guardian_email, class_label, created_at, updated_at
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.guardian_email)
        .bind(&student.class_label)
        .bind(student.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating student: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::EntityNotFound(student.id.to_string()))
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Student>, DomainError> {
        let row: Option<StudentRow> = sqlx::query_as(
            r#"
            DELETE FROM students
            WHERE id = $1
            RETURNING id, name, guardian_email, class_label, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting student: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
