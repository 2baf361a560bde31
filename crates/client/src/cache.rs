//! Read cache keyed by registry path and query parameters.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::RwLock;

/// Identifies one cached read: the route's path template plus the query
/// parameters it was fetched with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub path: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl QueryKey {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<QueryKey, Value>,
    /// Bumped on every invalidation of a path.
    generations: HashMap<&'static str, u64>,
}

/// Validated response bodies, stored as JSON.
///
/// Each path carries a generation counter. A read records the generation
/// before it goes to the network and stores its body only if no write has
/// invalidated the path in the meantime.
#[derive(Debug, Default)]
pub struct QueryCache {
    state: RwLock<CacheState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &QueryKey) -> Option<Value> {
        self.state.read().await.entries.get(key).cloned()
    }

    /// Current generation of `path`.
    pub async fn generation(&self, path: &str) -> u64 {
        self.state
            .read()
            .await
            .generations
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub async fn insert(&self, key: QueryKey, value: Value) {
        self.state.write().await.entries.insert(key, value);
    }

    /// Store `value` only if `key.path` is still at `generation`. Returns
    /// whether the value was stored.
    pub async fn insert_if_current(&self, key: QueryKey, value: Value, generation: u64) -> bool {
        let mut state = self.state.write().await;
        let current = state.generations.get(key.path).copied().unwrap_or(0);
        if current != generation {
            return false;
        }
        state.entries.insert(key, value);
        true
    }

    /// Drop every entry fetched from `path`, whatever its parameters, and
    /// advance its generation. Returns how many entries were removed.
    pub async fn invalidate(&self, path: &'static str) -> usize {
        let mut state = self.state.write().await;
        *state.generations.entry(path).or_default() += 1;
        let before = state.entries.len();
        state.entries.retain(|key, _| key.path != path);
        before - state.entries.len()
    }

    pub async fn contains(&self, key: &QueryKey) -> bool {
        self.state.read().await.entries.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
