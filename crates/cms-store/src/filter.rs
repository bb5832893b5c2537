//! Record filters
//!
//! A [`Filter`] is a conjunction of field-equality conditions. Conditions are
//! compared against the serialized form of a record, which keeps the filter
//! independent of the concrete record type.

use serde::Serialize;
use serde_json::Value;

/// Field-equality filter for record queries.
///
/// An empty filter matches every record.
///
/// # Examples
///
/// ```
/// use cms_store::Filter;
/// use serde_json::json;
///
/// let filter = Filter::new().eq("role", "owner").eq("active", true);
/// assert!(filter.matches(&json!({ "role": "owner", "active": true, "name": "a" })));
/// assert!(!filter.matches(&json!({ "role": "member", "active": true })));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a filter on the primary key.
    pub fn by_id(id: uuid::Uuid) -> Self {
        Self::new().eq("id", id)
    }

    /// Add an equality condition on `field`.
    ///
    /// The value is serialized with `serde_json`, so ids, enums and
    /// timestamps compare the same way they are stored.
    pub fn eq(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        // Keys are ids, enums and scalars; none of them fail to serialize.
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.conditions.push((field.into(), value));
        self
    }

    /// Check whether a serialized record satisfies every condition.
    ///
    /// A missing field never matches, not even a `null` condition.
    pub fn matches(&self, record: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }

    /// Whether this filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&json!({})));
        assert!(filter.matches(&json!({ "anything": 1 })));
    }

    #[test]
    fn test_uuid_condition_matches_serialized_uuid() {
        let id = Uuid::now_v7();
        let record = json!({ "id": id.to_string(), "name": "x" });

        assert!(Filter::by_id(id).matches(&record));
        assert!(!Filter::by_id(Uuid::now_v7()).matches(&record));
    }

    #[test]
    fn test_missing_field_does_not_match_null() {
        let filter = Filter::new().eq("icon", Option::<String>::None);
        assert!(!filter.matches(&json!({ "name": "x" })));
        assert!(filter.matches(&json!({ "name": "x", "icon": null })));
    }

    #[test]
    fn test_all_conditions_required() {
        let filter = Filter::new().eq("a", 1).eq("b", "two");
        assert!(filter.matches(&json!({ "a": 1, "b": "two" })));
        assert!(!filter.matches(&json!({ "a": 1, "b": "three" })));
    }
}
