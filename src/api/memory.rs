use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use super::ApiClient;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory stand-in for the portal backend.
///
/// Collections behave like the REST resources (ids assigned on create,
/// `<resource>/<id>` addressing). Fixed responses can be registered for the
/// portal endpoints, and failures injected per method and path.
#[derive(Default)]
pub struct MemoryApiClient {
    state: Mutex<MemoryState>,
    gate: Arc<RwLock<()>>,
}

#[derive(Default)]
struct MemoryState {
    collections: HashMap<String, Vec<Value>>,
    responses: HashMap<(Method, String), Value>,
    failures: HashMap<(Method, String), StatusCode>,
    calls: Vec<ApiCall>,
}

impl MemoryApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_collection(self, resource: &str, records: Value) -> Self {
        self.seed(resource, records);
        self
    }

    pub fn seed(&self, resource: &str, records: Value) {
        let records = match records {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => vec![other],
        };
        self.state().collections.insert(resource.to_string(), records);
    }

    pub fn collection(&self, resource: &str) -> Vec<Value> {
        self.state()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Fixed answer for one method and path; takes precedence over collections.
    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.state()
            .responses
            .insert((method, path.to_string()), body);
    }

    pub fn fail(&self, method: Method, path: &str, status: StatusCode) {
        self.state()
            .failures
            .insert((method, path.to_string()), status);
    }

    pub fn recover(&self, method: Method, path: &str) {
        self.state().failures.remove(&(method, path.to_string()));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    pub fn write_calls(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method != Method::GET)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Holds every write call at the gate until the returned guard drops.
    pub async fn pause_writes(&self) -> OwnedRwLockWriteGuard<()> {
        self.gate.clone().write_owned().await
    }

    fn record(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Option<Value>, AppError> {
        let mut state = self.state();
        state.calls.push(ApiCall {
            method: method.clone(),
            path: path.to_string(),
            body: body.cloned(),
        });

        if let Some(status) = state.failures.get(&(method.clone(), path.to_string())) {
            return Err(AppError::Status {
                status: *status,
                body: format!("injected failure for {} {}", method, path),
            });
        }
        Ok(state.responses.get(&(method, path.to_string())).cloned())
    }

    async fn wait_gate(&self) {
        let _open = self.gate.read().await;
    }
}

fn split_id(path: &str) -> Option<(&str, i64)> {
    let (resource, id) = path.rsplit_once('/')?;
    id.parse::<i64>().ok().map(|id| (resource, id))
}

fn record_id(record: &Value) -> Option<i64> {
    record.get("id").and_then(Value::as_i64)
}

fn not_found(path: &str) -> AppError {
    AppError::Status {
        status: StatusCode::NOT_FOUND,
        body: format!("no resource at {}", path),
    }
}

fn as_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[async_trait]
impl ApiClient for MemoryApiClient {
    async fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value, AppError> {
        if let Some(fixed) = self.record(Method::GET, path, None)? {
            return Ok(fixed);
        }

        let state = self.state();
        if let Some(items) = state.collections.get(path) {
            return Ok(Value::Array(items.clone()));
        }
        if let Some((resource, id)) = split_id(path) {
            if let Some(found) = state
                .collections
                .get(resource)
                .and_then(|items| items.iter().find(|r| record_id(r) == Some(id)))
            {
                return Ok(found.clone());
            }
        }
        Err(not_found(path))
    }

    async fn post(
        &self,
        path: &str,
        _query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<String, AppError> {
        let fixed = self.record(Method::POST, path, body)?;
        self.wait_gate().await;
        if let Some(fixed) = fixed {
            return Ok(as_text(fixed));
        }

        let mut state = self.state();
        let items = state.collections.entry(path.to_string()).or_default();
        let next_id = items.iter().filter_map(record_id).max().unwrap_or(0) + 1;
        let mut record = body.cloned().unwrap_or_else(|| json!({}));
        if let Value::Object(map) = &mut record {
            map.insert("id".to_string(), json!(next_id));
        }
        items.push(record);
        Ok("Created".to_string())
    }

    async fn put(&self, path: &str, body: &Value) -> Result<String, AppError> {
        let fixed = self.record(Method::PUT, path, Some(body))?;
        self.wait_gate().await;
        if let Some(fixed) = fixed {
            return Ok(as_text(fixed));
        }

        let (resource, id) = split_id(path).ok_or_else(|| not_found(path))?;
        let mut state = self.state();
        let slot = state
            .collections
            .get_mut(resource)
            .and_then(|items| items.iter_mut().find(|r| record_id(r) == Some(id)))
            .ok_or_else(|| not_found(path))?;

        let mut record = body.clone();
        if let Value::Object(map) = &mut record {
            map.insert("id".to_string(), json!(id));
        }
        *slot = record;
        Ok("Updated".to_string())
    }

    async fn delete(&self, path: &str) -> Result<String, AppError> {
        let fixed = self.record(Method::DELETE, path, None)?;
        self.wait_gate().await;
        if let Some(fixed) = fixed {
            return Ok(as_text(fixed));
        }

        let (resource, id) = split_id(path).ok_or_else(|| not_found(path))?;
        let mut state = self.state();
        let items = state
            .collections
            .get_mut(resource)
            .ok_or_else(|| not_found(path))?;
        let before = items.len();
        items.retain(|r| record_id(r) != Some(id));
        if items.len() == before {
            return Err(not_found(path));
        }
        Ok("Deleted".to_string())
    }
}
