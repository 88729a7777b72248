// ============================================================================
// Edubloc Core - Audit Entry Entity
// File: crates/edubloc-core/src/domain/audit.rs
// Description: Append-only audit trail entry, one per observed mutation
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::context::Actor;

/// Mutation kind observed through a tenant connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "created" => Some(AuditAction::Created),
            "updated" => Some(AuditAction::Updated),
            "deleted" => Some(AuditAction::Deleted),
            _ => None,
        }
    }
}

/// Before/after snapshots attached to an audit entry. Creates carry
/// only `after`, deletes only `before`, updates both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditDetails {
    pub before: Option<Value>,
    pub after: Option<Value>,
}

impl AuditDetails {
    pub fn for_create(after: Value) -> Self {
        Self { before: None, after: Some(after) }
    }

    pub fn for_update(before: Value, after: Value) -> Self {
        Self { before: Some(before), after: Some(after) }
    }

    pub fn for_delete(before: Value) -> Self {
        Self { before: Some(before), after: None }
    }
}

/// One audit trail row, written into the same tenant database as the
/// mutation it describes. Never updated or deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Uuid,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub details: Option<AuditDetails>,
}

impl AuditEntry {
    /// Build an entry for an observed mutation, synthesizing the
    /// human-readable description from the actor, the action verb,
    /// the entity and its display label where one is available.
    pub fn build(
        actor: &Actor,
        action: AuditAction,
        entity_type: &str,
        entity_id: &str,
        details: AuditDetails,
    ) -> Self {
        let snapshot = details.after.as_ref().or(details.before.as_ref());
        let label = snapshot.and_then(display_label);

        let description = match label {
            Some(label) => format!(
                "{} {} {} {} ({})",
                actor.display_name, action.as_str(), entity_type, entity_id, label
            ),
            None => format!(
                "{} {} {} {}",
                actor.display_name, action.as_str(), entity_type, entity_id
            ),
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id: actor.id,
            action,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            description,
            details: Some(details),
        }
    }
}

/// Display label of an entity snapshot: tries `name`, `title`, then
/// `label`, falling back to none.
pub fn display_label(snapshot: &Value) -> Option<String> {
    ["name", "title", "label"]
        .iter()
        .find_map(|field| snapshot.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            display_name: "Alice Dupont".to_string(),
            bloc_id: Some(3),
        }
    }

    #[test]
    fn test_display_label_field_order() {
        assert_eq!(
            display_label(&json!({"title": "T", "name": "N"})),
            Some("N".to_string())
        );
        assert_eq!(display_label(&json!({"label": "L"})), Some("L".to_string()));
        assert_eq!(display_label(&json!({"other": "x"})), None);
    }

    #[test]
    fn test_description_with_label() {
        let entry = AuditEntry::build(
            &actor(),
            AuditAction::Created,
            "student",
            "abc-123",
            AuditDetails::for_create(json!({"name": "Jean Martin"})),
        );
        assert_eq!(
            entry.description,
            "Alice Dupont created student abc-123 (Jean Martin)"
        );
    }

    #[test]
    fn test_description_without_label() {
        let entry = AuditEntry::build(
            &actor(),
            AuditAction::Deleted,
            "student",
            "abc-123",
            AuditDetails::for_delete(json!({"guardian_email": "p@example.com"})),
        );
        assert_eq!(entry.description, "Alice Dupont deleted student abc-123");
    }

    #[test]
    fn test_update_uses_after_snapshot_for_label() {
        let entry = AuditEntry::build(
            &actor(),
            AuditAction::Updated,
            "student",
            "abc-123",
            AuditDetails::for_update(json!({"name": "Old"}), json!({"name": "New"})),
        );
        assert!(entry.description.ends_with("(New)"));
        let details = entry.details.unwrap();
        assert!(details.before.is_some());
        assert!(details.after.is_some());
    }
}
