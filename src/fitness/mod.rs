//! Per-genome fitness caching (spec §3 Population, §4.7 step 2, §9 "Fitness cache"
//! redesign note).
pub mod cache;

pub use cache::Cache;
