//! Field-level document snapshots for change detection.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single field value in a document snapshot.
///
/// Untagged: RFC 3339 strings deserialize as instants, other strings as
/// text; anything else (numbers, arrays, maps) is carried opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Instant(DateTime<Utc>),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Value equality as the change watcher sees it: instants compare by
    /// instant, strings by string. A representation change counts as a
    /// different value.
    pub fn same_value(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Instant(a), FieldValue::Instant(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Other(a), FieldValue::Other(b)) => a == b,
            _ => false,
        }
    }
}

/// One document snapshot: field name to value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSnapshot(pub HashMap<String, FieldValue>);

impl ItemSnapshot {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }
}

impl<const N: usize> From<[(&str, FieldValue); N]> for ItemSnapshot {
    fn from(fields: [(&str, FieldValue); N]) -> Self {
        ItemSnapshot(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rfc3339_strings_deserialize_as_instants() {
        let snapshot: ItemSnapshot = serde_json::from_str(
            r#"{"endTime": "2025-03-20T15:00:00Z", "ends_at": "15:00", "room": 12}"#,
        )
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert!(matches!(
            snapshot.field("endTime"),
            Some(FieldValue::Instant(t)) if *t == expected
        ));
        assert!(matches!(
            snapshot.field("ends_at"),
            Some(FieldValue::Text(s)) if s == "15:00"
        ));
        assert!(matches!(snapshot.field("room"), Some(FieldValue::Other(_))));
    }

    #[test]
    fn representation_change_is_a_different_value() {
        let instant =
            FieldValue::Instant(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap());
        let text = FieldValue::Text("2025-03-20T15:00:00Z".to_string());

        assert!(!instant.same_value(&text));
        assert!(instant.same_value(&instant.clone()));
    }
}
