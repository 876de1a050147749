//! Administrative slice: student use cases

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use campus::{AppError, Page, Repository, Student, StudentRoster, StudentStatus, UseCase};

/// Partial update of a student
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<StudentStatus>,
}

/// Enroll a new student
pub struct RegisterStudent<R> {
    students: Arc<R>,
}

impl<R: StudentRoster> RegisterStudent<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R: StudentRoster> UseCase for RegisterStudent<R> {
    type Input = Student;
    type Output = Student;

    async fn validate(&self, student: &Student) -> Result<(), AppError> {
        if student.id.is_some() {
            return Err(AppError::validation("a new student must not carry an id"));
        }
        student.validate()?;
        ensure_email_free(self.students.as_ref(), &student.email, None).await
    }

    async fn perform(&self, student: Student) -> Result<Student, AppError> {
        let saved = self.students.save(student).await?;
        tracing::info!(
            "Registered student: {} ({})",
            saved.full_name,
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }
}

/// Reject an email already held by a student other than `owner`
///
/// A concurrent registration can still win the race; the unique index then
/// fails the save as an infrastructure error.
async fn ensure_email_free<R: StudentRoster + ?Sized>(
    students: &R,
    email: &str,
    owner: Option<Uuid>,
) -> Result<(), AppError> {
    match students.find_by_email(email).await? {
        Some(holder) if holder.id != owner => Err(AppError::validation("email is already in use")),
        _ => Ok(()),
    }
}

/// Fetch one student; absence is an error here
pub struct GetStudent<R> {
    students: Arc<R>,
}

impl<R: Repository<Student, Uuid>> GetStudent<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R: Repository<Student, Uuid>> UseCase for GetStudent<R> {
    type Input = Uuid;
    type Output = Student;

    async fn perform(&self, id: Uuid) -> Result<Student, AppError> {
        self.students
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Student", id))
    }
}

pub struct ListStudents<R> {
    students: Arc<R>,
}

impl<R: Repository<Student, Uuid>> ListStudents<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R: Repository<Student, Uuid>> UseCase for ListStudents<R> {
    type Input = Page;
    type Output = Vec<Student>;

    async fn perform(&self, page: Page) -> Result<Vec<Student>, AppError> {
        self.students.list(page).await
    }
}

/// Apply a partial update to an existing student
pub struct UpdateStudent<R> {
    students: Arc<R>,
}

impl<R: StudentRoster> UpdateStudent<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R: StudentRoster> UseCase for UpdateStudent<R> {
    type Input = StudentChanges;
    type Output = Student;

    async fn validate(&self, changes: &StudentChanges) -> Result<(), AppError> {
        if changes.full_name.is_none() && changes.email.is_none() && changes.status.is_none() {
            return Err(AppError::validation("no changes supplied"));
        }
        Ok(())
    }

    async fn perform(&self, changes: StudentChanges) -> Result<Student, AppError> {
        let current = self
            .students
            .get_by_id(changes.id)
            .await?
            .ok_or_else(|| AppError::not_found("Student", changes.id))?;
        let current_email = current.email.clone();

        let updated = Student {
            full_name: changes
                .full_name
                .map(|name| name.trim().to_string())
                .unwrap_or(current.full_name),
            email: changes
                .email
                .map(|email| email.trim().to_lowercase())
                .unwrap_or(current.email),
            status: changes.status.unwrap_or(current.status),
            ..current
        };
        updated.validate()?;
        if updated.email != current_email {
            ensure_email_free(self.students.as_ref(), &updated.email, updated.id).await?;
        }

        self.students.save(updated).await
    }
}

/// Remove a student (and, through the schema, their invoices)
pub struct RemoveStudent<R> {
    students: Arc<R>,
}

impl<R: Repository<Student, Uuid>> RemoveStudent<R> {
    pub fn new(students: Arc<R>) -> Self {
        Self { students }
    }
}

#[async_trait]
impl<R: Repository<Student, Uuid>> UseCase for RemoveStudent<R> {
    type Input = Uuid;
    type Output = ();

    async fn perform(&self, id: Uuid) -> Result<(), AppError> {
        self.students.delete(id).await?;
        tracing::info!("Removed student: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sql::{StudentMapper, StudentRepository};
    use crate::test_support::memory_database;

    fn grace() -> Student {
        Student::new("Grace Hopper".to_string(), "grace@example.org".to_string())
    }

    async fn repo(db: &crate::adapters::Database) -> Arc<StudentRepository> {
        Arc::new(db.session().await.unwrap().repository::<StudentMapper>())
    }

    #[tokio::test]
    async fn test_register_then_get() {
        let db = memory_database().await;
        let students = repo(&db).await;

        let outcome = RegisterStudent::new(students.clone()).execute(grace()).await;
        assert!(outcome.is_ok());
        let saved = outcome.into_result().unwrap();

        let fetched = GetStudent::new(students)
            .execute(saved.id.unwrap())
            .await
            .into_result()
            .unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_student() {
        let db = memory_database().await;
        let students = repo(&db).await;

        let outcome = RegisterStudent::new(students.clone())
            .execute(Student::new("Grace".to_string(), "not-an-email".to_string()))
            .await;
        assert!(outcome.is_err());
        assert!(matches!(outcome.error(), Some(AppError::Validation(_))));
        assert!(students.list(Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_preassigned_id() {
        let db = memory_database().await;
        let mut student = grace();
        student.id = Some(Uuid::new_v4());

        let outcome = RegisterStudent::new(repo(&db).await).execute(student).await;
        assert!(matches!(outcome.error(), Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let db = memory_database().await;
        let outcome = GetStudent::new(repo(&db).await).execute(Uuid::new_v4()).await;
        assert!(matches!(outcome.error(), Some(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let db = memory_database().await;
        let students = repo(&db).await;
        let saved = students.save(grace()).await.unwrap();

        let updated = UpdateStudent::new(students)
            .execute(StudentChanges {
                id: saved.id.unwrap(),
                email: Some(" Grace.Hopper@Navy.MIL ".to_string()),
                status: Some(StudentStatus::Graduated),
                ..Default::default()
            })
            .await
            .into_result()
            .unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.full_name, "Grace Hopper");
        assert_eq!(updated.email, "grace.hopper@navy.mil");
        assert_eq!(updated.status, StudentStatus::Graduated);
    }

    #[tokio::test]
    async fn test_update_requires_changes_and_existing_student() {
        let db = memory_database().await;
        let students = repo(&db).await;
        let use_case = UpdateStudent::new(students);

        let empty = use_case
            .execute(StudentChanges {
                id: Uuid::new_v4(),
                ..Default::default()
            })
            .await;
        assert!(matches!(empty.error(), Some(AppError::Validation(_))));

        let missing = use_case
            .execute(StudentChanges {
                id: Uuid::new_v4(),
                full_name: Some("Nobody".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(missing.error(), Some(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let db = memory_database().await;
        let students = repo(&db).await;
        let id = students.save(grace()).await.unwrap().id.unwrap();

        let remove = RemoveStudent::new(students.clone());
        assert!(remove.execute(id).await.is_ok());
        assert!(remove.execute(id).await.is_ok());
        assert!(students.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let db = memory_database().await;
        let students = repo(&db).await;
        students.save(grace()).await.unwrap();

        let outcome = RegisterStudent::new(students.clone())
            .execute(Student::new("Impostor".to_string(), " Grace@Example.org".to_string()))
            .await;
        assert!(matches!(outcome.error(), Some(AppError::Validation(_))));
        assert_eq!(students.list(Page::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let db = memory_database().await;
        let students = repo(&db).await;
        let saved = students.save(grace()).await.unwrap();

        let outcome = UpdateStudent::new(students)
            .execute(StudentChanges {
                id: saved.id.unwrap(),
                email: Some("GRACE@example.org".to_string()),
                full_name: Some("Rear Admiral Hopper".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(outcome.into_result().unwrap().full_name, "Rear Admiral Hopper");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let db = memory_database().await;
        let students = repo(&db).await;
        students.save(grace()).await.unwrap();
        let ada = students
            .save(Student::new("Ada".to_string(), "ada@example.org".to_string()))
            .await
            .unwrap();

        let outcome = UpdateStudent::new(students.clone())
            .execute(StudentChanges {
                id: ada.id.unwrap(),
                email: Some("GRACE@example.org".to_string()),
                ..Default::default()
            })
            .await;

        match outcome.error() {
            Some(AppError::Validation(message)) => assert_eq!(message, "email is already in use"),
            other => panic!("expected validation error, got {other:?}"),
        }
        let stored = students.get_by_id(ada.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.email, "ada@example.org");
    }
}
