//! Document identity and server-side stamping.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

/// Generate a fresh store identifier
pub fn new_document_id() -> String {
    Uuid::new_v4().to_string()
}

/// Check that a path-supplied identifier is syntactically a store id.
///
/// Returns the canonical (hyphenated, lowercase) form so lookups are
/// insensitive to how the caller formatted the UUID.
pub fn parse_document_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw).ok().map(|u| u.to_string())
}

/// Stamp `createdAt` with the current UTC time (RFC 3339)
pub fn stamp_created_at(doc: &mut Value) {
    if let Some(obj) = doc.as_object_mut() {
        obj.insert(
            "createdAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_valid() {
        let id = new_document_id();
        assert_eq!(parse_document_id(&id), Some(id));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_document_id("not-a-uuid").is_none());
        assert!(parse_document_id("").is_none());
        assert!(parse_document_id("123").is_none());
    }

    #[test]
    fn test_parse_canonicalizes() {
        let canonical = parse_document_id("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(canonical, "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_stamp_created_at() {
        let mut doc = json!({"name": "Pen"});
        stamp_created_at(&mut doc);
        let stamped = doc["createdAt"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(stamped).unwrap();
        assert!(parsed <= Utc::now());
    }
}
