mod sharded;

pub use sharded::DashMapAdapter;

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::map::SequentialMap;
use crate::options::Options;
use crate::sortedvec::RwLockMap;

/// Unordered map on a plain hash table. Not thread-safe.
pub struct HashMapAdapter<K, V> {
    inner: FxHashMap<K, V>,
}

pub type RwLockHashMap<K, V> = RwLockMap<K, V, HashMapAdapter<K, V>>;

impl<K: Debug, V: Debug> Debug for HashMapAdapter<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K, V> HashMapAdapter<K, V> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> SequentialMap<K, V> for HashMapAdapter<K, V>
where
    K: Hash + Eq + Clone,
{
    fn with_options(options: Options) -> Self {
        let mut inner = FxHashMap::default();
        inner.reserve(options.capacity());

        Self { inner }
    }

    fn store(&mut self, key: &K, value: V) {
        self.inner.insert(key.clone(), value);
    }

    fn load(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn load_and_delete(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    fn delete(&mut self, key: &K) {
        self.inner.remove(key);
    }

    fn contain(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn clear(&mut self) {
        trace!(entries = self.inner.len(), "clear hash map");
        self.inner.clear();
    }
}
