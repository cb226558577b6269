use serde::{Deserialize, Serialize};

/// Capacity bounds for the derived-relation caches of a program.
///
/// Each bound limits the total number of elements summed over all cached sets of one
/// cache (a key mapping to a large set costs more than one mapping to a small set).
/// `concurrency_level` is the number of independently locked shards per cache.
///
/// Unknown keys are rejected at parse time, so a misspelled bound fails the run
/// instead of silently falling back to its default.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CacheConfig {
    pub teacher_periods_cache_size: usize,
    pub room_periods_cache_size: usize,
    pub course_periods_cache_size: usize,
    pub course_teachers_cache_size: usize,
    pub required_resources_cache_size: usize,
    pub room_resources_cache_size: usize,
    pub binding_resources_cache_size: usize,
    pub prerequisites_cache_size: usize,
    pub concurrency_level: usize,
}

impl Default for CacheConfig {
    fn default() -> CacheConfig {
        CacheConfig {
            teacher_periods_cache_size: 10_000,
            room_periods_cache_size: 10_000,
            course_periods_cache_size: 10_000,
            course_teachers_cache_size: 10_000,
            required_resources_cache_size: 10_000,
            room_resources_cache_size: 10_000,
            binding_resources_cache_size: 10_000,
            prerequisites_cache_size: 10_000,
            concurrency_level: 4,
        }
    }
}
