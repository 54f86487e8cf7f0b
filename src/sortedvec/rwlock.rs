use std::fmt::Debug;
use std::marker::PhantomData;

use parking_lot::RwLock;

use crate::map::{ConcurrentMap, SequentialMap};
use crate::options::Options;

use super::{SortedIntVecMap, SortedVecMap};

/// Thread-safe map made of a sequential map behind one reader/writer lock.
///
/// `load` and `contain` share the read lock. Every other operation takes the
/// write lock exactly once, so `load_and_delete` reads and removes in a single
/// critical section.
pub struct RwLockMap<K, V, M> {
    inner: RwLock<M>,
    _marker: PhantomData<fn(K) -> V>,
}

pub type RwLockSortedVecMap<K, V> = RwLockMap<K, V, SortedVecMap<K, V>>;
pub type RwLockSortedIntVecMap<K, V> = RwLockMap<K, V, SortedIntVecMap<K, V>>;

impl<K, V, M: Debug> Debug for RwLockMap<K, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RwLockMap")
            .field("inner", &*self.inner.read())
            .finish()
    }
}

impl<K, V, M> RwLockMap<K, V, M> {
    pub fn from_inner(inner: M) -> Self {
        Self {
            inner: RwLock::new(inner),
            _marker: PhantomData,
        }
    }

    pub fn into_inner(self) -> M {
        self.inner.into_inner()
    }

    /// Run `f` on the inner map while holding the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<K, V, M> ConcurrentMap<K, V> for RwLockMap<K, V, M>
where
    V: Clone,
    M: SequentialMap<K, V> + Send + Sync,
{
    fn with_options(options: Options) -> Self {
        Self::from_inner(M::with_options(options))
    }

    fn store(&self, key: &K, value: V) {
        self.inner.write().store(key, value);
    }

    fn load(&self, key: &K) -> Option<V> {
        self.inner.read().load(key).cloned()
    }

    fn load_and_delete(&self, key: &K) -> Option<V> {
        self.inner.write().load_and_delete(key)
    }

    fn delete(&self, key: &K) {
        self.inner.write().delete(key);
    }

    fn contain(&self, key: &K) -> bool {
        self.inner.read().contain(key)
    }

    fn clear(&self) {
        self.inner.write().clear();
    }
}
