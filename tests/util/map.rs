use crossbeam_utils::thread;
use ordkv::map::{ConcurrentMap, SequentialMap};
use ordkv::util::random::Random;
use rand::prelude::SliceRandom;
use rand::prelude::ThreadRng;
use rand::thread_rng;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt::Debug;

#[derive(Clone, Debug, PartialEq)]
enum Operation {
    Store,
    Load,
    LoadAndDelete,
    Delete,
    Contain,
}

#[derive(PartialEq)]
enum OperationType {
    Some, // the operation for existing key on the map
    None, // the operation for not existing key on the map
}

/// Operations of either map trait with owned results, so one harness drives
/// both.
pub trait Subject<K> {
    fn store(&mut self, key: &K, value: u64);
    fn load(&mut self, key: &K) -> Option<u64>;
    fn load_and_delete(&mut self, key: &K) -> Option<u64>;
    fn delete(&mut self, key: &K);
    fn contain(&mut self, key: &K) -> bool;
    fn clear(&mut self);
}

pub struct Sequential<M>(pub M);

impl<K, M: SequentialMap<K, u64>> Subject<K> for Sequential<M> {
    fn store(&mut self, key: &K, value: u64) {
        self.0.store(key, value)
    }

    fn load(&mut self, key: &K) -> Option<u64> {
        self.0.load(key).copied()
    }

    fn load_and_delete(&mut self, key: &K) -> Option<u64> {
        self.0.load_and_delete(key)
    }

    fn delete(&mut self, key: &K) {
        self.0.delete(key)
    }

    fn contain(&mut self, key: &K) -> bool {
        self.0.contain(key)
    }

    fn clear(&mut self) {
        self.0.clear()
    }
}

pub struct Concurrent<M>(pub M);

impl<K, M: ConcurrentMap<K, u64>> Subject<K> for Concurrent<M> {
    fn store(&mut self, key: &K, value: u64) {
        self.0.store(key, value)
    }

    fn load(&mut self, key: &K) -> Option<u64> {
        self.0.load(key)
    }

    fn load_and_delete(&mut self, key: &K) -> Option<u64> {
        self.0.load_and_delete(key)
    }

    fn delete(&mut self, key: &K) {
        self.0.delete(key)
    }

    fn contain(&mut self, key: &K) -> bool {
        self.0.contain(key)
    }

    fn clear(&mut self) {
        self.0.clear()
    }
}

/// Run `iter` random operations on the map and on a `BTreeMap`, comparing
/// every result. Return both so the caller can inspect the final state.
pub fn stress_against_reference<K, S>(mut map: S, iter: u64) -> (S, BTreeMap<K, u64>)
where
    K: Ord + Clone + Random + Debug,
    S: Subject<K>,
{
    // 10 times try to get not existing key, or return if failing
    let gen_not_existing_key = |rng: &mut ThreadRng, map: &BTreeMap<K, u64>| {
        let mut key = K::gen(rng);

        for _ in 0..10 {
            if !map.contains_key(&key) {
                return Ok(key);
            }

            key = K::gen(rng);
        }

        Err(())
    };

    let ops = [
        Operation::Store,
        Operation::Load,
        Operation::LoadAndDelete,
        Operation::Delete,
        Operation::Contain,
    ];
    let types = [OperationType::Some, OperationType::None];

    let mut ref_map: BTreeMap<K, u64> = BTreeMap::new();
    let mut rng = thread_rng();

    for i in 1..=iter {
        if rng.gen_ratio(1, 10_000) {
            map.clear();
            ref_map.clear();
            continue;
        }

        let t = types.choose(&mut rng).unwrap();
        let ref_map_keys = ref_map.keys().collect::<Vec<&K>>();
        let existing_key = ref_map_keys.choose(&mut rng).map(|k| (*k).clone());

        let key = match existing_key {
            Some(key) if *t == OperationType::Some => key,
            _ => {
                if let Ok(key) = gen_not_existing_key(&mut rng, &ref_map) {
                    key
                } else {
                    continue;
                }
            }
        };

        match ops.choose(&mut rng).unwrap() {
            Operation::Store => {
                let data: u64 = rng.gen();

                map.store(&key, data);
                ref_map.insert(key, data);
            }
            Operation::Load => {
                assert_eq!(
                    map.load(&key),
                    ref_map.get(&key).copied(),
                    "[{:0>10}] Load {:?}",
                    i,
                    key
                );
            }
            Operation::LoadAndDelete => {
                assert_eq!(
                    map.load_and_delete(&key),
                    ref_map.remove(&key),
                    "[{:0>10}] LoadAndDelete {:?}",
                    i,
                    key
                );
            }
            Operation::Delete => {
                map.delete(&key);
                ref_map.remove(&key);

                assert!(!map.contain(&key), "[{:0>10}] Delete {:?}", i, key);
            }
            Operation::Contain => {
                assert_eq!(
                    map.contain(&key),
                    ref_map.contains_key(&key),
                    "[{:0>10}] Contain {:?}",
                    i,
                    key
                );
            }
        }
    }

    (map, ref_map)
}

pub fn stress_sequential<K, M>(iter: u64) -> (M, BTreeMap<K, u64>)
where
    K: Ord + Clone + Random + Debug,
    M: SequentialMap<K, u64>,
{
    let (map, ref_map) = stress_against_reference(Sequential(M::new()), iter);
    (map.0, ref_map)
}

pub fn stress_concurrent_as_sequential<K, M>(iter: u64) -> (M, BTreeMap<K, u64>)
where
    K: Ord + Clone + Random + Debug,
    M: ConcurrentMap<K, u64>,
{
    let (map, ref_map) = stress_against_reference(Concurrent(M::new()), iter);
    (map.0, ref_map)
}

/// Every thread works on its own keys (`key % thread_num == thread id`) and
/// keeps its own reference map. Whatever the interleaving, each result must
/// match that reference, and the final map must equal the union of them.
pub fn stress_concurrent_disjoint<M>(iter: u64, thread_num: u64, keys_per_thread: u64)
where
    M: ConcurrentMap<u64, u64>,
{
    let map = M::new();

    let refs = thread::scope(|s| {
        let mut threads = Vec::new();

        for id in 0..thread_num {
            let map = &map;

            let t = s.spawn(move |_| {
                let mut rng = thread_rng();
                let mut ref_map: BTreeMap<u64, u64> = BTreeMap::new();

                for i in 0..iter {
                    let key = rng.gen_range(0..keys_per_thread) * thread_num + id;

                    match rng.gen_range(0..5) {
                        0 => {
                            let value: u64 = rng.gen();
                            map.store(&key, value);
                            ref_map.insert(key, value);
                        }
                        1 => assert_eq!(
                            map.load(&key),
                            ref_map.get(&key).copied(),
                            "[{:0>10}] thread {} Load {}",
                            i,
                            id,
                            key
                        ),
                        2 => assert_eq!(
                            map.load_and_delete(&key),
                            ref_map.remove(&key),
                            "[{:0>10}] thread {} LoadAndDelete {}",
                            i,
                            id,
                            key
                        ),
                        3 => {
                            map.delete(&key);
                            ref_map.remove(&key);
                        }
                        _ => assert_eq!(
                            map.contain(&key),
                            ref_map.contains_key(&key),
                            "[{:0>10}] thread {} Contain {}",
                            i,
                            id,
                            key
                        ),
                    }
                }

                ref_map
            });

            threads.push(t);
        }

        threads
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    })
    .unwrap();

    let mut expected = BTreeMap::new();
    for ref_map in refs {
        expected.extend(ref_map);
    }

    for key in 0..(thread_num * keys_per_thread) {
        assert_eq!(map.load(&key), expected.get(&key).copied(), "final {}", key);
    }
}

/// Many threads race `load_and_delete` over the same keys. Each key must be
/// handed to exactly one of them, with its stored value.
pub fn stress_load_and_delete_race<M>(num: u64, thread_num: u64)
where
    M: ConcurrentMap<u64, u64>,
{
    let map = M::new();

    for key in 0..num {
        map.store(&key, key * 10);
    }

    let taken = thread::scope(|s| {
        let mut threads = Vec::new();

        for _ in 0..thread_num {
            let t = s.spawn(|_| {
                let mut keys: Vec<u64> = (0..num).collect();
                keys.shuffle(&mut thread_rng());

                keys.into_iter()
                    .filter_map(|key| map.load_and_delete(&key).map(|value| (key, value)))
                    .collect::<Vec<_>>()
            });

            threads.push(t);
        }

        threads
            .into_iter()
            .map(|h| h.join().unwrap())
            .flatten()
            .collect::<Vec<_>>()
    })
    .unwrap();

    assert_eq!(taken.len() as u64, num);

    let mut seen = BTreeMap::new();
    for (key, value) in taken {
        assert_eq!(value, key * 10);
        assert_eq!(seen.insert(key, value), None, "{} taken twice", key);
    }

    for key in 0..num {
        assert!(!map.contain(&key));
    }
}

/// Writers only ever store `key * 2` under `key`; readers must never see
/// anything else.
pub fn stress_readers_see_whole_values<M>(iter: u64, writer_num: u64, reader_num: u64)
where
    M: ConcurrentMap<u64, u64>,
{
    const KEYS: u64 = 256;

    let map = M::new();

    thread::scope(|s| {
        for _ in 0..writer_num {
            s.spawn(|_| {
                let mut rng = thread_rng();

                for _ in 0..iter {
                    let key = rng.gen_range(0..KEYS);

                    match rng.gen_range(0..4) {
                        0 => map.delete(&key),
                        1 => {
                            if let Some(value) = map.load_and_delete(&key) {
                                assert_eq!(value, key * 2);
                            }
                        }
                        _ => map.store(&key, key * 2),
                    }
                }
            });
        }

        for _ in 0..reader_num {
            s.spawn(|_| {
                let mut rng = thread_rng();

                for _ in 0..iter {
                    let key = rng.gen_range(0..KEYS);

                    if let Some(value) = map.load(&key) {
                        assert_eq!(value, key * 2);
                    }
                    let _ = map.contain(&key);
                }
            });
        }
    })
    .unwrap();
}
