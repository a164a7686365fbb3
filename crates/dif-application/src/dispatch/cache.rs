//! Invoker cache

use crate::invoker::Invoker;
use dashmap::DashMap;
use dif_domain::Result;
use std::any::TypeId;
use std::hash::Hash;

/// Key used by convention dispatchers: the convention name, the dispatched
/// value's type and the awaited output type
///
/// A cache may be shared by dispatchers of different conventions, so the
/// convention is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    /// Convention the method was registered under
    pub convention: &'static str,
    /// Concrete type of the receiver value
    pub value: TypeId,
    /// Type the method's future resolves to
    pub output: TypeId,
}

impl DispatchKey {
    pub fn new(convention: &'static str, value: TypeId, output: TypeId) -> Self {
        Self {
            convention,
            value,
            output,
        }
    }
}

/// Thread-safe map from a runtime key to a built [`Invoker`]
///
/// Entries are created on first use and never evicted. Concurrent misses for
/// the same key may each build an invoker; the last insert wins, which is fine
/// because every builder produces an equivalent invoker for that key. No lock
/// is held while building.
#[derive(Debug)]
pub struct InvokerCache<K = TypeId>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Invoker>,
}

impl<K: Eq + Hash> InvokerCache<K> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<Invoker> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Return the cached invoker for `key`, building and storing one on a miss
    pub fn get_or_try_insert_with<F>(&self, key: K, build: F) -> Result<Invoker>
    where
        F: FnOnce() -> Result<Invoker>,
    {
        // Clone out of the shard guard so no lock is held while building
        if let Some(invoker) = self.get(&key) {
            return Ok(invoker);
        }
        let invoker = build()?;
        self.entries.insert(key, invoker.clone());
        Ok(invoker)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> Default for InvokerCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
