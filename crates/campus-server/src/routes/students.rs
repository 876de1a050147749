//! Administrative routes: students
//!
//! Each request acquires its own database session; the use cases do the rest.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use campus::{Page, UseCase};

use super::error::ApiError;
use crate::adapters::sql::{StudentMapper, StudentRepository};
use crate::application::{GetStudent, ListStudents, RegisterStudent, RemoveStudent, UpdateStudent};
use crate::models::{CreateStudentRequest, PageParams, StudentResponse, UpdateStudentRequest};
use crate::AppState;

async fn repository(state: &AppState) -> Result<Arc<StudentRepository>, ApiError> {
    let session = state.db.session().await?;
    Ok(Arc::new(session.repository::<StudentMapper>()))
}

/// List students
#[utoipa::path(
    get,
    path = "/api/admin/students",
    params(PageParams),
    responses(
        (status = 200, description = "One page of students", body = Vec<StudentResponse>),
        (status = 400, description = "Request could not be processed", body = crate::models::ErrorBody)
    ),
    tag = "Administrative"
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = ListStudents::new(repository(&state).await?)
        .execute(Page::from(params))
        .await
        .into_result()?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Register a student
#[utoipa::path(
    post,
    path = "/api/admin/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student registered", body = StudentResponse),
        (status = 422, description = "Invalid student data", body = crate::models::ErrorBody),
        (status = 400, description = "Request could not be processed", body = crate::models::ErrorBody)
    ),
    tag = "Administrative"
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let student = RegisterStudent::new(repository(&state).await?)
        .execute(payload.into())
        .await
        .into_result()?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/api/admin/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::models::ErrorBody)
    ),
    tag = "Administrative"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = GetStudent::new(repository(&state).await?)
        .execute(id)
        .await
        .into_result()?;

    Ok(Json(student.into()))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/api/admin/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found", body = crate::models::ErrorBody),
        (status = 422, description = "Invalid student data", body = crate::models::ErrorBody)
    ),
    tag = "Administrative"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = UpdateStudent::new(repository(&state).await?)
        .execute(payload.into_changes(id))
        .await
        .into_result()?;

    Ok(Json(student.into()))
}

/// Remove a student (idempotent)
#[utoipa::path(
    delete,
    path = "/api/admin/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student removed or already absent"),
        (status = 400, description = "Request could not be processed", body = crate::models::ErrorBody)
    ),
    tag = "Administrative"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    RemoveStudent::new(repository(&state).await?)
        .execute(id)
        .await
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}
