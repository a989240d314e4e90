//! Per-type memoization shared by the field converter and the schema cache

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::trace;

/// Write-once map from a Rust type to a value computed for it.
///
/// Entries are pure functions of the key type, so a poisoned lock only costs
/// a recomputation.
#[derive(Default)]
pub struct TypeCache {
    entries: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value cached under `K`, computing it with `init` on a miss.
    pub fn get_or_insert_with<K, V, F>(&self, init: F) -> Arc<V>
    where
        K: 'static,
        V: Any + Send + Sync,
        F: FnOnce() -> V,
    {
        let key = TypeId::of::<K>();

        if let Some(hit) = self.lookup::<V>(key) {
            return hit;
        }

        trace!("Resolving cache entry for {}", std::any::type_name::<K>());
        let value = Arc::new(init());
        if let Ok(mut entries) = self.entries.write() {
            let entry = entries
                .entry(key)
                .or_insert_with(|| value.clone() as Arc<dyn Any + Send + Sync>);
            if let Ok(existing) = entry.clone().downcast::<V>() {
                return existing;
            }
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<V: Any + Send + Sync>(&self, key: TypeId) -> Option<Arc<V>> {
        let entries = self.entries.read().ok()?;
        entries.get(&key)?.clone().downcast::<V>().ok()
    }
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache")
            .field("entries", &self.len())
            .finish()
    }
}
