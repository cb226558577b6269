#[cfg(test)]
mod tests;

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// A size-bounded, lazily-populated cache of one derived relation (entity -> set of
/// entities) over an immutable domain graph.
///
/// The bound counts elements summed over all cached sets, not keys. Insertion beyond
/// the bound evicts the least-recently-used computed entries. A key's loader runs at
/// most once under concurrent first access; later requesters block on the slot and
/// share the result. Loaders run without holding any cache lock, so a loader may
/// consult other caches (or this one under a different key) recursively.
#[derive(Debug)]
pub struct RelationCache<K, T> {
    shards: Vec<Mutex<Shard<K, T>>>,
    max_weight_per_shard: usize,
}

#[derive(Debug)]
struct Shard<K, T> {
    entries: HashMap<K, Entry<T>>,
    tick: u64,
    total_weight: usize,
}

#[derive(Debug)]
struct Entry<T> {
    slot: Arc<OnceLock<Arc<BTreeSet<T>>>>,
    last_use: u64,
    weight: usize, // 0 until the value is computed and accounted
}

impl<K: Eq + Hash + Clone, T: Ord> RelationCache<K, T> {
    /// `max_weight` is split evenly over `concurrency_level` independently locked
    /// shards.
    pub fn new(max_weight: usize, concurrency_level: usize) -> RelationCache<K, T> {
        let shard_count = concurrency_level.max(1);
        RelationCache {
            shards: (0..shard_count)
                .map(|_| {
                    Mutex::new(Shard {
                        entries: HashMap::new(),
                        tick: 0,
                        total_weight: 0,
                    })
                })
                .collect(),
            max_weight_per_shard: (max_weight / shard_count).max(1),
        }
    }

    pub fn get_or_load<F>(&self, key: K, loader: F) -> Arc<BTreeSet<T>>
    where
        F: FnOnce() -> BTreeSet<T>,
    {
        let shard = &self.shards[self.shard_index(&key)];

        let slot = {
            let mut shard = shard.lock().unwrap();
            shard.tick += 1;
            let tick = shard.tick;
            let entry = shard.entries.entry(key.clone()).or_insert_with(|| Entry {
                slot: Arc::new(OnceLock::new()),
                last_use: tick,
                weight: 0,
            });
            entry.last_use = tick;
            entry.slot.clone()
        };

        let mut loaded_here = false;
        let value = slot
            .get_or_init(|| {
                loaded_here = true;
                Arc::new(loader())
            })
            .clone();

        if loaded_here {
            let mut shard = shard.lock().unwrap();
            // the entry may have been evicted while the loader ran; waiters still
            // share the value through the slot, only the bookkeeping is skipped
            if let Some(entry) = shard
                .entries
                .get_mut(&key)
                .filter(|entry| Arc::ptr_eq(&entry.slot, &slot))
            {
                entry.weight = value.len();
                shard.total_weight += value.len();
                self.evict_overweight(&mut shard);
            }
        }

        value
    }

    /// Returns the key's value if it has already been computed, without loading.
    pub fn get_if_cached(&self, key: &K) -> Option<Arc<BTreeSet<T>>> {
        let shard = self.shards[self.shard_index(key)].lock().unwrap();
        shard
            .entries
            .get(key)
            .and_then(|entry| entry.slot.get().cloned())
    }

    /// Total element count over all computed cached sets.
    pub fn cached_weight(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap().total_weight)
            .sum()
    }

    fn evict_overweight(&self, shard: &mut Shard<K, T>) {
        while shard.total_weight > self.max_weight_per_shard {
            // in-flight entries (weight 0 and not yet computed) are never evicted
            let victim = shard
                .entries
                .iter()
                .filter(|(_, entry)| entry.slot.get().is_some())
                .min_by_key(|(_, entry)| entry.last_use)
                .map(|(key, _)| key.clone());
            match victim {
                Some(key) => {
                    let removed = shard.entries.remove(&key).unwrap();
                    shard.total_weight -= removed.weight;
                }
                None => break,
            }
        }
    }

    fn shard_index(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }
}
