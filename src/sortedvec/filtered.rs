use std::fmt::Debug;

use tracing::{debug, trace};

use crate::filter::{BloomFilter, IntKey};
use crate::map::SequentialMap;
use crate::options::Options;

use super::SortedVecMap;

/// `SortedVecMap` for integer keys with a Bloom filter in front of the
/// binary search.
///
/// Every stored key is added to the filter. `load` and `contain` return "not
/// found" without searching when the filter proves the key was never stored.
/// `delete` and `load_and_delete` do not touch the filter, and neither does
/// `clear` unless `Options::reset_filter_on_clear` is set, so the filter may
/// keep keys that are gone from the map. That only costs a useless search.
pub struct SortedIntVecMap<K, V> {
    inner: SortedVecMap<K, V>,
    filter: BloomFilter,
    reset_filter_on_clear: bool,
}

impl<K: Debug, V: Debug> Debug for SortedIntVecMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedIntVecMap")
            .field("entries", &self.inner)
            .field("filter", &self.filter)
            .finish()
    }
}

impl<K, V> SortedIntVecMap<K, V> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.keys()
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }
}

impl<K: IntKey, V> SortedIntVecMap<K, V> {
    pub fn locate(&self, key: &K) -> Result<usize, usize> {
        self.inner.locate(key)
    }
}

impl<K, V> SequentialMap<K, V> for SortedIntVecMap<K, V>
where
    K: IntKey,
{
    fn with_options(options: Options) -> Self {
        if !options.is_default() {
            debug!(
                capacity = options.capacity(),
                filter_bits = options.filter_bits(),
                reset_filter_on_clear = options.resets_filter_on_clear(),
                "create sorted int vec map"
            );
        }

        Self {
            inner: SortedVecMap::with_options(options),
            filter: BloomFilter::with_bits(options.filter_bits()),
            reset_filter_on_clear: options.resets_filter_on_clear(),
        }
    }

    fn store(&mut self, key: &K, value: V) {
        self.inner.store(key, value);
        self.filter.add(*key);
    }

    fn load(&self, key: &K) -> Option<&V> {
        if !self.filter.may_exist(*key) {
            return None;
        }

        self.inner.load(key)
    }

    fn load_and_delete(&mut self, key: &K) -> Option<V> {
        self.inner.load_and_delete(key)
    }

    fn delete(&mut self, key: &K) {
        self.inner.delete(key);
    }

    fn contain(&self, key: &K) -> bool {
        self.filter.may_exist(*key) && self.inner.contain(key)
    }

    fn clear(&mut self) {
        self.inner.clear();

        if self.reset_filter_on_clear {
            trace!(bits = self.filter.bits(), "reset membership filter");
            self.filter.reset();
        }
    }
}
