//! Student repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Student;
use crate::error::DomainError;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Student>, DomainError>;

    /// Students whose guardian contact matches, within one tenant.
    async fn find_by_guardian_email(&self, email: &str) -> Result<Vec<Student>, DomainError>;

    async fn create(&self, student: &Student) -> Result<Student, DomainError>;

    async fn update(&self, student: &Student) -> Result<Student, DomainError>;

    /// Delete by id, returning the pre-mutation row when one existed.
    async fn delete(&self, id: &Uuid) -> Result<Option<Student>, DomainError>;
}
