//! Generic list management: one controller per REST resource, client-side
//! search over own and joined fields, and reload-after-write CRUD.

mod controller;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::api::{self, ApiClient};

pub use controller::{ListController, RemoveOutcome, SaveOutcome};

/// Label for a foreign key that is not set.
pub const NOT_SET: &str = "N/A";
/// Label for a foreign key with no match in the loaded lookup set.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// A record managed by a [`ListController`].
pub trait Entity:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Sibling collections needed to resolve foreign keys for display and search.
    type Lookups: Lookups;

    /// Resource path relative to the API base, e.g. `classes`.
    const RESOURCE: &'static str;

    const DELETE_PROMPT: &'static str;

    fn id(&self) -> Option<i64>;

    /// The body sent on create/update: trimmed, coerced, without `id`.
    fn payload(&self) -> Self;

    /// First required field that is empty in a normalized payload.
    fn missing_required(&self, mode: SaveMode) -> Option<&'static str>;

    fn search_fields(&self, lookups: &Self::Lookups) -> Vec<String>;
}

#[async_trait]
pub trait Lookups: Clone + Default + Send + Sync + 'static {
    /// Re-fetch every lookup collection. A collection whose fetch fails keeps
    /// its current contents.
    async fn refresh(&self, api: &dyn ApiClient) -> Self;
}

#[async_trait]
impl Lookups for () {
    async fn refresh(&self, _api: &dyn ApiClient) -> Self {}
}

/// Ids of `0` count as unset, matching how the backend's forms treat them.
pub fn id_set(id: Option<i64>) -> Option<i64> {
    id.filter(|&v| v != 0)
}

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Records where any searchable field contains `query`, case-insensitively.
/// An empty query yields a copy of the whole collection.
pub fn filter_records<T, F>(items: &[T], query: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    let q = normalize_query(query);
    if q.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            fields(*item)
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
        })
        .cloned()
        .collect()
}

pub fn resolve_label<T, K, L>(id: Option<i64>, items: &[T], key: K, label: L) -> String
where
    K: Fn(&T) -> Option<i64>,
    L: Fn(&T) -> String,
{
    let Some(id) = id_set(id) else {
        return NOT_SET.to_string();
    };
    items
        .iter()
        .find(|item| key(*item) == Some(id))
        .map(label)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub(crate) async fn refresh_list<T>(api: &dyn ApiClient, path: &str, current: &[T]) -> Vec<T>
where
    T: DeserializeOwned + Clone + Send + Sync,
{
    match api::fetch_list::<T>(api, path, &[]).await {
        Ok(items) => items,
        Err(e) => {
            error!("Load {} failed: {}", path, e);
            current.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: i64,
        name: Option<String>,
        code: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: Some("Công nghệ thông tin".to_string()), code: "CNTT".to_string() },
            Row { id: 2, name: None, code: "KT".to_string() },
            Row { id: 3, name: Some("Ngoại ngữ".to_string()), code: "NN".to_string() },
        ]
    }

    fn fields(row: &Row) -> Vec<String> {
        vec![row.name.clone().unwrap_or_default(), row.code.clone()]
    }

    #[test]
    fn empty_query_returns_independent_copy() {
        let source = rows();
        let mut view = filter_records(&source, "   ", fields);
        assert_eq!(view, source);

        view[0].code = "changed".to_string();
        view.pop();
        assert_eq!(source[0].code, "CNTT");
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let view = filter_records(&rows(), "  cntt ", fields);
        assert_eq!(view.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);

        let view = filter_records(&rows(), "NGOẠI", fields);
        assert_eq!(view.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn missing_fields_never_match_but_do_not_panic() {
        let view = filter_records(&rows(), "kt", fields);
        assert_eq!(view.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
        assert!(filter_records(&rows(), "zzz", fields).is_empty());
    }

    #[test]
    fn labels_use_sentinels() {
        let items = rows();
        let key = |r: &Row| Some(r.id);
        let label = |r: &Row| r.code.clone();

        assert_eq!(resolve_label(None, &items, key, label), NOT_SET);
        assert_eq!(resolve_label(Some(0), &items, key, label), NOT_SET);
        assert_eq!(resolve_label(Some(42), &items, key, label), UNKNOWN);
        assert_eq!(resolve_label(Some(3), &items, key, label), "NN");
    }
}
