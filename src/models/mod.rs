// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, GeoPoint, RankedMatch, ScoringWeights, UserProfile, DEFAULT_AGE,
    DEFAULT_MAX_DISTANCE_MILES,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse};
