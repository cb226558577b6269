pub mod base_types;
pub mod caches;
pub mod config;
pub mod errors;
pub mod json_serialisation;
pub mod program;
