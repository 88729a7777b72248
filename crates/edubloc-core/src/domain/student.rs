// ============================================================================
// Edubloc Core - Student Entity
// File: crates/edubloc-core/src/domain/student.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Student record inside one tenant's database. The minimal audited
/// entity the routing core hands repositories out for.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Student {
    pub id: Uuid,

    #[validate(length(min = 1, message = "Student name is required"))]
    pub name: String,

    /// Guardian contact, matched by the cross-tenant fan-out search.
    #[validate(email(message = "Guardian email must be valid"))]
    pub guardian_email: String,

    pub class_label: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn new(
        name: String,
        guardian_email: String,
        class_label: Option<String>,
    ) -> Result<Self, validator::ValidationErrors> {
        let student = Self {
            id: Uuid::new_v4(),
            name,
            guardian_email: guardian_email.to_ascii_lowercase(),
            class_label,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        student.validate()?;
        Ok(student)
    }

    pub fn update_details(
        &mut self,
        name: String,
        guardian_email: String,
        class_label: Option<String>,
    ) -> Result<(), validator::ValidationErrors> {
        self.name = name;
        self.guardian_email = guardian_email.to_ascii_lowercase();
        self.class_label = class_label;
        self.updated_at = Utc::now();
        self.validate()
    }
}
