//! Mingle Match - matching service for the Mingle social app
//!
//! This library provides the candidate filtering and compatibility scoring
//! used to rank match suggestions: a pool of active profiles is filtered by
//! hard eligibility gates (age range, distance) and survivors are ranked by
//! a weighted overlap score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_miles, MatchResult, Matcher, ScoreError};
pub use crate::models::{AgeRange, GeoPoint, RankedMatch, ScoringWeights, UserProfile};
