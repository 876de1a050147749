//! Student persistence record

use async_trait::async_trait;
use uuid::Uuid;

use campus::{AppError, Student, StudentRoster, StudentStatus};

use crate::adapters::sql::repository::{
    format_timestamp, parse_timestamp, parse_uuid, AnyQuery, Mapper, Record, SqlRepository,
};

pub type StudentRepository = SqlRepository<StudentMapper>;

/// Row of the `students` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StudentRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Record for StudentRecord {
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &["full_name", "email", "status"];

    fn key(&self) -> &str {
        &self.id
    }

    fn bind_columns<'q>(self, query: AnyQuery<'q>) -> AnyQuery<'q> {
        query.bind(self.full_name).bind(self.email).bind(self.status)
    }
}

pub struct StudentMapper;

impl Mapper for StudentMapper {
    type Entity = Student;
    type Id = Uuid;
    type Record = StudentRecord;

    const ENTITY: &'static str = "Student";

    fn key(id: &Uuid) -> String {
        id.to_string()
    }

    fn to_record(student: Student) -> StudentRecord {
        StudentRecord {
            id: student.id.unwrap_or_else(Uuid::new_v4).to_string(),
            full_name: student.full_name,
            email: student.email,
            status: student.status.to_string(),
            created_at: student.created_at.as_ref().map(format_timestamp).unwrap_or_default(),
            updated_at: student.updated_at.as_ref().map(format_timestamp).unwrap_or_default(),
        }
    }

    fn to_domain(record: StudentRecord) -> Result<Student, AppError> {
        let status = record
            .status
            .parse::<StudentStatus>()
            .map_err(|e| AppError::unexpected(format!("corrupt student {}: {}", record.id, e)))?;

        Ok(Student {
            id: Some(parse_uuid(&record.id)?),
            full_name: record.full_name,
            email: record.email,
            status,
            created_at: Some(parse_timestamp(&record.created_at)?),
            updated_at: Some(parse_timestamp(&record.updated_at)?),
        })
    }
}

#[async_trait]
impl StudentRoster for StudentRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        self.find_one_by("email", email.to_string()).await
    }
}
