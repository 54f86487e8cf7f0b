use crate::filter::IntKey;
use crate::hashmap::{DashMapAdapter, HashMapAdapter, RwLockHashMap};
use crate::options::Options;
use crate::sortedvec::{RwLockSortedIntVecMap, RwLockSortedVecMap, SortedIntVecMap, SortedVecMap};

pub trait SequentialMap<K, V> {
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::with_options(Options::default())
    }

    fn with_options(options: Options) -> Self
    where
        Self: Sized;

    /// Store (key, value) into the map.
    ///
    /// If the key already exists, its value is overwritten in place.
    fn store(&mut self, key: &K, value: V);

    /// Load the value of the key.
    ///
    /// If the key exists, return the reference of the value.
    /// If not, return None.
    fn load(&self, key: &K) -> Option<&V>;

    /// Remove (key, value) from the map and return the value, as one operation.
    ///
    /// If the key does not exist, return None and leave the map untouched.
    fn load_and_delete(&mut self, key: &K) -> Option<V>;

    /// Remove (key, value) from the map. No-op if the key does not exist.
    fn delete(&mut self, key: &K);

    fn contain(&self, key: &K) -> bool;

    /// Remove every entry.
    fn clear(&mut self);
}

/// Same operations as `SequentialMap`, callable through a shared reference
/// from many threads.
pub trait ConcurrentMap<K, V>: Send + Sync {
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::with_options(Options::default())
    }

    fn with_options(options: Options) -> Self
    where
        Self: Sized;

    fn store(&self, key: &K, value: V);

    /// Load the value of the key.
    ///
    /// The value is cloned out, since no reference may outlive the guard.
    fn load(&self, key: &K) -> Option<V>;

    /// Remove (key, value) from the map and return the value.
    ///
    /// No other operation on the map can be observed between the read and the
    /// removal.
    fn load_and_delete(&self, key: &K) -> Option<V>;

    fn delete(&self, key: &K);

    fn contain(&self, key: &K) -> bool;

    fn clear(&self);
}

/// Backing strategy of a map, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// sorted vector, binary search
    SortedVec,
    /// sorted vector with a membership filter in front of the search
    SortedIntVec,
    Hash,
}

/// Backing strategy of a thread-safe map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrentMapKind {
    /// `kind` behind one reader/writer lock
    Locked(MapKind),
    /// sharded concurrent hash map
    Sharded,
}

impl MapKind {
    pub fn build_sequential<K, V>(self, options: Options) -> Box<dyn SequentialMap<K, V>>
    where
        K: IntKey + 'static,
        V: 'static,
    {
        match self {
            MapKind::SortedVec => Box::new(SortedVecMap::<K, V>::with_options(options)),
            MapKind::SortedIntVec => Box::new(SortedIntVecMap::<K, V>::with_options(options)),
            MapKind::Hash => Box::new(HashMapAdapter::<K, V>::with_options(options)),
        }
    }
}

impl ConcurrentMapKind {
    pub fn build_concurrent<K, V>(self, options: Options) -> Box<dyn ConcurrentMap<K, V>>
    where
        K: IntKey + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        match self {
            ConcurrentMapKind::Locked(MapKind::SortedVec) => {
                Box::new(RwLockSortedVecMap::<K, V>::with_options(options))
            }
            ConcurrentMapKind::Locked(MapKind::SortedIntVec) => {
                Box::new(RwLockSortedIntVecMap::<K, V>::with_options(options))
            }
            ConcurrentMapKind::Locked(MapKind::Hash) => {
                Box::new(RwLockHashMap::<K, V>::with_options(options))
            }
            ConcurrentMapKind::Sharded => {
                Box::new(DashMapAdapter::<K, V>::with_options(options))
            }
        }
    }
}
