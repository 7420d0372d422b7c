//! Record field access and JSON parsing.
//!
//! Records are arbitrary JSON entities; the engine never requires a concrete
//! record type. Field access goes through a tagged-variant accessor resolved
//! either by field name or by a caller-supplied derivation function.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Derivation function used by [`FieldAccessor::ByFunction`].
pub type AccessorFn = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Accessor for a record field, by field name or by derivation function.
#[derive(Clone)]
pub enum FieldAccessor {
    /// Look the value up under a top-level field name.
    ByName(String),
    /// Derive the value from the whole record.
    ByFunction(AccessorFn),
}

impl FieldAccessor {
    pub fn by_name(name: impl Into<String>) -> Self {
        FieldAccessor::ByName(name.into())
    }

    pub fn by_function<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        FieldAccessor::ByFunction(Arc::new(f))
    }

    /// Resolve the raw value for a record. Missing fields and JSON nulls both
    /// resolve to `None`.
    pub fn resolve(&self, record: &Value) -> Option<Value> {
        let value = match self {
            FieldAccessor::ByName(name) => record.get(name).cloned(),
            FieldAccessor::ByFunction(f) => f(record),
        };
        value.filter(|v| !v.is_null())
    }

    /// Resolve the field as a calendar date.
    pub fn resolve_date(&self, record: &Value) -> Option<NaiveDate> {
        self.resolve(record).as_ref().and_then(parse_date_value)
    }

    /// Resolve the field as display text. Strings are used as-is; numbers are
    /// formatted.
    pub fn resolve_string(&self, record: &Value) -> Option<String> {
        match self.resolve(record)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccessor::ByName(name) => f.debug_tuple("ByName").field(name).finish(),
            FieldAccessor::ByFunction(_) => f.write_str("ByFunction(..)"),
        }
    }
}

/// Parse a JSON value as a calendar date.
///
/// Accepts plain dates (`2024-02-10`) and RFC 3339 timestamps
/// (`2024-02-10T09:30:00Z`), which are truncated to their date part.
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?;
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

/// SHA-256 checksum of a record's JSON, used as its version in cache keys.
pub fn record_checksum(record: &Value) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(record.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse a record collection from a JSON string.
///
/// The payload must be a JSON array of objects; anything else is rejected
/// with context describing the offending element.
pub fn parse_records_json_str(json: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(json).context("Invalid records JSON")?;
    let records = match value {
        Value::Array(items) => items,
        _ => anyhow::bail!("Records payload must be a JSON array"),
    };
    for (index, record) in records.iter().enumerate() {
        if !record.is_object() {
            anyhow::bail!("Record at index {} is not a JSON object", index);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_by_name() {
        let record = json!({"title": "Fix login flow", "startDate": "2024-02-10"});
        let accessor = FieldAccessor::by_name("title");
        assert_eq!(
            accessor.resolve_string(&record),
            Some("Fix login flow".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_field() {
        let record = json!({"title": "No dates here"});
        let accessor = FieldAccessor::by_name("startDate");
        assert_eq!(accessor.resolve(&record), None);
    }

    #[test]
    fn test_resolve_null_field_is_absent() {
        let record = json!({"dueDate": null});
        let accessor = FieldAccessor::by_name("dueDate");
        assert_eq!(accessor.resolve(&record), None);
    }

    #[test]
    fn test_resolve_by_function() {
        let record = json!({"sprint": {"endsOn": "2024-03-01"}});
        let accessor =
            FieldAccessor::by_function(|r| r.get("sprint").and_then(|s| s.get("endsOn")).cloned());
        assert_eq!(
            accessor.resolve_date(&record),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_resolve_numeric_label() {
        let record = json!({"id": 42});
        let accessor = FieldAccessor::by_name("id");
        assert_eq!(accessor.resolve_string(&record), Some("42".to_string()));
    }

    #[test]
    fn test_parse_plain_date() {
        let date = parse_date_value(&json!("2024-02-10"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 10));
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let date = parse_date_value(&json!("2024-02-10T09:30:00Z"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 10));
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_date_value(&json!("next tuesday")), None);
        assert_eq!(parse_date_value(&json!(12345)), None);
    }

    #[test]
    fn test_checksum_is_stable() {
        let record = json!({"id": "ISSUE-1", "title": "Stable"});
        assert_eq!(record_checksum(&record), record_checksum(&record.clone()));
    }

    #[test]
    fn test_checksum_changes_with_content() {
        let a = json!({"id": "ISSUE-1", "title": "Before"});
        let b = json!({"id": "ISSUE-1", "title": "After"});
        assert_ne!(record_checksum(&a), record_checksum(&b));
    }

    #[test]
    fn test_parse_records_json() {
        let records = parse_records_json_str(r#"[{"id": "A"}, {"id": "B"}]"#)
            .expect("Should parse record array");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let result = parse_records_json_str(r#"{"id": "A"}"#);
        assert!(result.is_err(), "Should reject a non-array payload");
    }

    #[test]
    fn test_parse_records_rejects_non_object_element() {
        let result = parse_records_json_str(r#"[{"id": "A"}, 42]"#);
        assert!(result.is_err(), "Should reject non-object records");
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(parse_records_json_str("not valid json {").is_err());
    }
}
