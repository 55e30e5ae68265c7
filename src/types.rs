// src/types.rs
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Field used to order an array whose elements are all objects.
///
/// Variants are listed in selection priority: `path` beats `name` beats `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Path,
    Name,
    Id,
}

impl SortKey {
    pub const PRIORITY: [SortKey; 3] = [SortKey::Path, SortKey::Name, SortKey::Id];

    pub fn field(self) -> &'static str {
        match self {
            SortKey::Path => "path",
            SortKey::Name => "name",
            SortKey::Id => "id",
        }
    }

    /// First key present in every element, or `None` if the slice is empty
    /// or holds anything other than objects.
    pub fn select(items: &[Value]) -> Option<SortKey> {
        if items.is_empty() || !items.iter().all(Value::is_object) {
            return None;
        }
        Self::PRIORITY.into_iter().find(|key| {
            items
                .iter()
                .all(|item| item.as_object().is_some_and(|m| m.contains_key(key.field())))
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_wins_over_name_and_id() {
        let items = vec![
            json!({"id": 1, "name": "b", "path": "z"}),
            json!({"id": 2, "name": "a", "path": "y"}),
        ];
        assert_eq!(SortKey::select(&items), Some(SortKey::Path));
    }

    #[test]
    fn key_must_be_present_in_every_element() {
        let items = vec![
            json!({"name": "b", "id": 1}),
            json!({"path": "a", "id": 2}),
        ];
        assert_eq!(SortKey::select(&items), Some(SortKey::Id));
    }

    #[test]
    fn no_key_for_empty_or_mixed_arrays() {
        assert_eq!(SortKey::select(&[]), None);
        assert_eq!(SortKey::select(&[json!({"id": 2}), json!("x")]), None);
        assert_eq!(SortKey::select(&[json!({"id": 2}), Value::Null]), None);
        assert_eq!(SortKey::select(&[json!({"key": 1}), json!({"key": 2})]), None);
    }

    #[test]
    fn report_success_tracks_failures() {
        let mut report = BatchReport::default();
        assert!(report.is_success());
        report.failed.push(FailedFile {
            path: PathBuf::from("broken.json"),
            error: "bad".into(),
        });
        assert!(!report.is_success());
    }
}
