use serde::{Deserialize, Serialize};
use crate::models::domain::RankedMatch;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RankedMatch>,
    /// Eligible candidates after filtering, before the limit was applied
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    /// Size of the active-user pool the filter ran over
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
