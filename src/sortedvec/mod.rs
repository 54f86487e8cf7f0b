mod filtered;
mod rwlock;

pub use filtered::SortedIntVecMap;
pub use rwlock::{RwLockMap, RwLockSortedIntVecMap, RwLockSortedVecMap};

use std::{cmp::Ordering, fmt::Debug, ptr};

use tracing::{debug, trace};

use crate::map::SequentialMap;
use crate::options::Options;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Map on a vector of entries kept strictly ascending by key.
///
/// Lookups are a binary search. Insert and remove shift the tail of the
/// vector by one slot, so they cost O(n) moves in the worst case.
pub struct SortedVecMap<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K: Debug, V: Debug> Debug for SortedVecMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.key, &e.value)))
            .finish()
    }
}

/// Insert `value` at `index`, moving `vec[index..]` one slot later.
fn slice_insert<T>(vec: &mut Vec<T>, index: usize, value: T) {
    let len = vec.len();
    assert!(index <= len, "insert index {} out of bounds {}", index, len);

    vec.reserve(1);

    unsafe {
        let ptr = vec.as_mut_ptr().add(index);

        if index < len {
            ptr::copy(ptr, ptr.add(1), len - index);
        }

        ptr::write(ptr, value);
        vec.set_len(len + 1);
    }
}

/// Remove the value at `index`, moving `vec[index + 1..]` one slot earlier.
fn slice_remove<T>(vec: &mut Vec<T>, index: usize) -> T {
    let len = vec.len();
    assert!(index < len, "remove index {} out of bounds {}", index, len);

    unsafe {
        let ptr = vec.as_mut_ptr().add(index);
        let value = ptr::read(ptr);

        ptr::copy(ptr.add(1), ptr, len - index - 1);
        vec.set_len(len - 1);

        value
    }
}

impl<K, V> SortedVecMap<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|e| &e.key)
    }

    /// (key, value) pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }
}

impl<K: Ord, V> SortedVecMap<K, V> {
    /// Binary search for the key.
    ///
    /// Return Ok(index) of the entry if the key exists.
    /// If not, return Err(index) where the key should be inserted, which is the
    /// number of keys less than it. An empty map returns Err(0).
    ///
    /// ```text
    /// keys: [1, 3]
    /// 0 -> Err(0), 1 -> Ok(0), 2 -> Err(1), 3 -> Ok(1), 4 -> Err(2)
    /// ```
    pub fn locate(&self, key: &K) -> Result<usize, usize> {
        let mut left = 0;
        let mut right = self.entries.len();

        while left < right {
            let mid = left + (right - left) / 2;

            match self.entries[mid].key.cmp(key) {
                Ordering::Equal => return Ok(mid),
                Ordering::Less => left = mid + 1,
                Ordering::Greater => right = mid,
            }
        }

        Err(left)
    }
}

impl<K, V> SequentialMap<K, V> for SortedVecMap<K, V>
where
    K: Ord + Clone,
{
    fn with_options(options: Options) -> Self {
        if !options.is_default() {
            debug!(capacity = options.capacity(), "create sorted vec map");
        }

        Self {
            entries: Vec::with_capacity(options.capacity()),
        }
    }

    fn store(&mut self, key: &K, value: V) {
        match self.locate(key) {
            Ok(index) => self.entries[index].value = value,
            Err(index) => {
                let entry = Entry {
                    key: key.clone(),
                    value,
                };
                slice_insert(&mut self.entries, index, entry);
            }
        }
    }

    fn load(&self, key: &K) -> Option<&V> {
        match self.locate(key) {
            Ok(index) => Some(&self.entries[index].value),
            Err(_) => None,
        }
    }

    fn load_and_delete(&mut self, key: &K) -> Option<V> {
        match self.locate(key) {
            Ok(index) => Some(slice_remove(&mut self.entries, index).value),
            Err(_) => None,
        }
    }

    fn delete(&mut self, key: &K) {
        if let Ok(index) = self.locate(key) {
            slice_remove(&mut self.entries, index);
        }
    }

    fn contain(&self, key: &K) -> bool {
        self.locate(key).is_ok()
    }

    fn clear(&mut self) {
        trace!(entries = self.entries.len(), "clear sorted vec map");
        self.entries.clear();
    }
}
