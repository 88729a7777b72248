//! Audit trail recording
//!
//! Observes successful mutations performed through a tenant
//! connection and appends entries to that same tenant's audit trail.

pub mod recorder;
pub mod audited_students;

pub use recorder::AuditRecorder;
pub use audited_students::AuditedStudentRepository;
