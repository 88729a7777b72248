// ============================================================================
// Edubloc API - Student Handlers
// File: crates/edubloc-api/src/handlers/students.rs
// ============================================================================
//! Student CRUD, tenant-agnostic: every handler just asks the scoped
//! provider for a repository and receives one wired to the right
//! database.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use edubloc_core::domain::Student;
use edubloc_core::error::DomainError;
use edubloc_core::repositories::StudentRepository;

use crate::error::error_response;
use crate::extract::CurrentContext;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Student creation payload
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub guardian_email: String,
    pub class_label: Option<String>,
}

/// Student update payload
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub guardian_email: String,
    pub class_label: Option<String>,
}

/// Student DTO for responses
#[derive(Debug, Serialize)]
pub struct StudentDto {
    pub id: String,
    pub name: String,
    pub guardian_email: String,
    pub class_label: Option<String>,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name,
            guardian_email: student.guardian_email,
            class_label: student.class_label,
        }
    }
}

/// Create student handler - POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    CurrentContext(ctx): CurrentContext,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<Json<ApiResponse<StudentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let repos = state
        .provider
        .for_context(&ctx)
        .await
        .map_err(|e| error_response(&e))?;

    let student = Student::new(payload.name, payload.guardian_email, payload.class_label)
        .map_err(|e| error_response(&DomainError::ValidationError(e.to_string())))?;

    let created = repos
        .students()
        .create(&student)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(StudentDto::from(created))))
}

/// Get student handler - GET /api/v1/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    CurrentContext(ctx): CurrentContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let repos = state
        .provider
        .for_context(&ctx)
        .await
        .map_err(|e| error_response(&e))?;

    let student = repos
        .students()
        .find_by_id(&id)
        .await
        .map_err(|e| error_response(&e))?
        .ok_or_else(|| error_response(&DomainError::EntityNotFound(id.to_string())))?;

    Ok(Json(ApiResponse::success(StudentDto::from(student))))
}

/// Update student handler - PUT /api/v1/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    CurrentContext(ctx): CurrentContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<Json<ApiResponse<StudentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let repos = state
        .provider
        .for_context(&ctx)
        .await
        .map_err(|e| error_response(&e))?;
    let students = repos.students();

    let mut student = students
        .find_by_id(&id)
        .await
        .map_err(|e| error_response(&e))?
        .ok_or_else(|| error_response(&DomainError::EntityNotFound(id.to_string())))?;

    student
        .update_details(payload.name, payload.guardian_email, payload.class_label)
        .map_err(|e| error_response(&DomainError::ValidationError(e.to_string())))?;

    let updated = students
        .update(&student)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(StudentDto::from(updated))))
}

/// Delete student handler - DELETE /api/v1/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    CurrentContext(ctx): CurrentContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    let repos = state
        .provider
        .for_context(&ctx)
        .await
        .map_err(|e| error_response(&e))?;

    let deleted = repos
        .students()
        .delete(&id)
        .await
        .map_err(|e| error_response(&e))?
        .ok_or_else(|| error_response(&DomainError::EntityNotFound(id.to_string())))?;

    Ok(Json(ApiResponse::success(StudentDto::from(deleted))))
}
