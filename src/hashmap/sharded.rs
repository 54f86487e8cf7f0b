use std::fmt::Debug;
use std::hash::Hash;

use dashmap::DashMap;

use crate::map::ConcurrentMap;
use crate::options::Options;

/// Thread-safe unordered map delegating to a sharded concurrent hash map.
///
/// Each operation locks only the shard of its key. `load_and_delete` is a
/// single removal on that shard.
pub struct DashMapAdapter<K: Eq + Hash, V> {
    inner: DashMap<K, V>,
}

impl<K: Eq + Hash + Debug, V: Debug> Debug for DashMapAdapter<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashMapAdapter")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<K: Eq + Hash, V> DashMapAdapter<K, V> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> ConcurrentMap<K, V> for DashMapAdapter<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn with_options(options: Options) -> Self {
        Self {
            inner: DashMap::with_capacity(options.capacity()),
        }
    }

    fn store(&self, key: &K, value: V) {
        self.inner.insert(key.clone(), value);
    }

    fn load(&self, key: &K) -> Option<V> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    fn load_and_delete(&self, key: &K) -> Option<V> {
        self.inner.remove(key).map(|(_, value)| value)
    }

    fn delete(&self, key: &K) {
        self.inner.remove(key);
    }

    fn contain(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn clear(&self) {
        self.inner.clear();
    }
}
