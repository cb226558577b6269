use super::RelationCache;

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn set_of(values: &[u16]) -> BTreeSet<u16> {
    values.iter().copied().collect()
}

#[test]
fn loader_runs_once_per_key() {
    // ARRANGE
    let cache: RelationCache<u16, u16> = RelationCache::new(100, 1);
    let load_count = AtomicUsize::new(0);

    // ACT
    let first = cache.get_or_load(7, || {
        load_count.fetch_add(1, Ordering::SeqCst);
        set_of(&[1, 2, 3])
    });
    let second = cache.get_or_load(7, || {
        load_count.fetch_add(1, Ordering::SeqCst);
        set_of(&[9])
    });

    // ASSERT
    assert_eq!(load_count.load(Ordering::SeqCst), 1);
    assert_eq!(*first, set_of(&[1, 2, 3]));
    assert_eq!(*second, *first);
}

#[test]
fn concurrent_first_access_shares_one_load() {
    // ARRANGE
    let cache: Arc<RelationCache<u16, u16>> = Arc::new(RelationCache::new(100, 4));
    let load_count = Arc::new(AtomicUsize::new(0));

    // ACT
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            let load_count = load_count.clone();
            thread::spawn(move || {
                cache.get_or_load(42, || {
                    load_count.fetch_add(1, Ordering::SeqCst);
                    // keep the load in flight long enough for the others to arrive
                    thread::sleep(Duration::from_millis(20));
                    set_of(&[4, 5])
                })
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // ASSERT
    assert_eq!(load_count.load(Ordering::SeqCst), 1);
    for result in results {
        assert_eq!(*result, set_of(&[4, 5]));
    }
}

#[test]
fn eviction_is_bounded_by_total_element_count() {
    // ARRANGE: bound of 4 elements in a single shard, each value weighs 2
    let cache: RelationCache<u16, u16> = RelationCache::new(4, 1);

    // ACT
    cache.get_or_load(0, || set_of(&[0, 1]));
    cache.get_or_load(1, || set_of(&[2, 3]));
    cache.get_or_load(2, || set_of(&[4, 5]));

    // ASSERT: key 0 is the least recently used and must have been evicted
    assert!(cache.get_if_cached(&0).is_none());
    assert!(cache.get_if_cached(&1).is_some());
    assert!(cache.get_if_cached(&2).is_some());
    assert_eq!(cache.cached_weight(), 4);
}

#[test]
fn recently_used_entries_survive_eviction() {
    // ARRANGE
    let cache: RelationCache<u16, u16> = RelationCache::new(4, 1);
    cache.get_or_load(0, || set_of(&[0, 1]));
    cache.get_or_load(1, || set_of(&[2, 3]));

    // ACT: touch key 0 so that key 1 becomes the eviction victim
    cache.get_or_load(0, || unreachable!("already cached"));
    cache.get_or_load(2, || set_of(&[4, 5]));

    // ASSERT
    assert!(cache.get_if_cached(&0).is_some());
    assert!(cache.get_if_cached(&1).is_none());
}

#[test]
fn dependent_loader_may_consult_another_cache() {
    // ARRANGE: the derived cache intersects values of the base cache, the way the
    // course-period cache consults the teacher-period cache
    let base: Arc<RelationCache<u16, u16>> = Arc::new(RelationCache::new(100, 2));
    let derived: RelationCache<u16, u16> = RelationCache::new(100, 2);

    // ACT
    let value = derived.get_or_load(0, || {
        let left = base.get_or_load(10, || set_of(&[1, 2, 3]));
        let right = base.get_or_load(11, || set_of(&[2, 3, 4]));
        left.intersection(&right).copied().collect()
    });

    // ASSERT
    assert_eq!(*value, set_of(&[2, 3]));
    assert!(base.get_if_cached(&10).is_some());
    assert!(base.get_if_cached(&11).is_some());
}

#[test]
fn loader_may_recurse_into_the_same_cache_under_a_different_key() {
    // ARRANGE
    let cache: Arc<RelationCache<u16, u16>> = Arc::new(RelationCache::new(100, 2));

    // ACT
    let inner_cache = cache.clone();
    let value = cache.get_or_load(0, move || {
        let inner = inner_cache.get_or_load(1, || set_of(&[7]));
        inner.iter().map(|v| v + 1).collect()
    });

    // ASSERT
    assert_eq!(*value, set_of(&[8]));
    assert_eq!(*cache.get_if_cached(&1).unwrap(), set_of(&[7]));
}
