//! Student DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use campus::{Student, StudentStatus};

use crate::application::StudentChanges;

/// Register student request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub email: String,
}

impl From<CreateStudentRequest> for Student {
    fn from(request: CreateStudentRequest) -> Self {
        Student::new(request.full_name, request.email)
    }
}

/// Partial student update; omitted fields are left untouched
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    /// One of `active`, `inactive`, `graduated`
    #[schema(value_type = Option<String>)]
    pub status: Option<StudentStatus>,
}

impl UpdateStudentRequest {
    pub fn into_changes(self, id: Uuid) -> StudentChanges {
        StudentChanges {
            id,
            full_name: self.full_name,
            email: self.email,
            status: self.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[schema(value_type = String)]
    pub status: StudentStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.unwrap_or_default(),
            full_name: student.full_name,
            email: student.email,
            status: student.status,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}
