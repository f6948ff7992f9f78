// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::haversine_miles;
pub use filters::{filter_candidates, is_eligible};
pub use matcher::{MatchResult, Matcher};
pub use scoring::{compatibility_score, ScoreError};
