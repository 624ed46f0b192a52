use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a file already held in an app's storage namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(rename = "fileKey")]
    pub file_key: String,
    pub name: String,
}

/// Handle returned by an upload. Only valid within the storage
/// namespace of the app the upload was directed at, and minted fresh
/// on every upload - tokens are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileToken {
    #[serde(rename = "fileKey")]
    pub file_key: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// A platform user as it appears inside record field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub code: String,
    pub name: String,
}

/// One field value inside a record snapshot.
///
/// The platform serializes attachment fields as arrays of file
/// references, user fields as user payloads, and everything else as
/// plain text. Shapes this crate never reads fall through to `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Files(Vec<FileRef>),
    User(UserRef),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_files(&self) -> Option<&[FileRef]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&UserRef> {
        match self {
            FieldValue::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// User code carried by this value, whether the field stores a
    /// user payload or a plain-text code.
    pub fn user_code(&self) -> Option<&str> {
        match self {
            FieldValue::User(user) => Some(&user.code),
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Point-in-time view of one record's field values, keyed by field code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl RecordSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_field(&self, field_code: &str) -> bool {
        self.fields.contains_key(field_code)
    }

    pub fn field(&self, field_code: &str) -> Option<&FieldValue> {
        self.fields.get(field_code)
    }

    pub fn with_field(mut self, field_code: &str, value: FieldValue) -> Self {
        self.fields.insert(field_code.to_string(), value);
        self
    }
}

/// One step transition of an app's approval process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTransition {
    /// Destination step name.
    pub to: String,
}

/// Process-management configuration of an app, as served by the
/// platform's status API. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub enabled: bool,
    pub transitions: Vec<ProcessTransition>,
}

impl ProcessDefinition {
    /// Destination step names in transition order.
    pub fn destination_steps(&self) -> impl Iterator<Item = &str> {
        self.transitions.iter().map(|t| t.to.as_str())
    }
}

/// Metadata for one attachable field in a record's form schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    /// Variable name compared against destination step names.
    pub var: String,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_value_deserializes_file_lists() {
        let value: FieldValue =
            serde_json::from_value(json!([{"fileKey": "k-1", "name": "hanko.png"}])).unwrap();
        let files = value.as_files().expect("expected file list");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_key, "k-1");
        assert_eq!(files[0].name, "hanko.png");
    }

    #[test]
    fn field_value_deserializes_users_and_text() {
        let user: FieldValue =
            serde_json::from_value(json!({"code": "U100", "name": "Tanaka"})).unwrap();
        assert_eq!(user.user_code(), Some("U100"));

        let text: FieldValue = serde_json::from_value(json!("plain")).unwrap();
        assert_eq!(text.as_text(), Some("plain"));
        assert_eq!(text.user_code(), Some("plain"));
    }

    #[test]
    fn unknown_shapes_fall_through_to_other() {
        let value: FieldValue = serde_json::from_value(json!({"nested": {"x": 1}})).unwrap();
        assert!(matches!(value, FieldValue::Other(_)));
        assert!(value.as_files().is_none());
    }

    #[test]
    fn record_snapshot_round_trips_flat_field_map() {
        let snapshot: RecordSnapshot = serde_json::from_value(json!({
            "approve": [{"fileKey": "k-2", "name": "seal.png"}],
            "updated_by": {"code": "U100", "name": "Tanaka"}
        }))
        .unwrap();
        assert!(snapshot.contains_field("approve"));
        assert!(!snapshot.contains_field("archive"));
        assert_eq!(
            snapshot.field("updated_by").and_then(FieldValue::as_user).map(|u| u.code.as_str()),
            Some("U100")
        );
    }
}
