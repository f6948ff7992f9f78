use serde::{Deserialize, Serialize};

/// Age a profile is treated as having when none was provided at signup
pub const DEFAULT_AGE: u32 = 25;

/// Distance cap (miles) applied when a profile has no stated preference
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 25.0;

/// User profile as stored in the directory's `users` collection
///
/// Profiles are created and edited by the surrounding app; this service only
/// reads them. Optional fields carry documented defaults, resolved through
/// the helper methods below rather than at deserialization time so the raw
/// document shape survives round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "preferredActivities", default)]
    pub preferred_activities: Vec<String>,
    #[serde(rename = "availableDays", default)]
    pub available_days: Vec<String>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<AgeRange>,
    #[serde(rename = "maxDistance", default)]
    pub max_distance: Option<f64>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// Age with the signup default applied
    pub fn age_or_default(&self) -> u32 {
        self.age.unwrap_or(DEFAULT_AGE)
    }

    /// Age range this user accepts in a match, defaulting to {18, 65}
    pub fn accepted_age_range(&self) -> AgeRange {
        self.age_range.unwrap_or_default()
    }

    /// Maximum match distance in miles, defaulting to 25
    pub fn max_distance_miles(&self) -> f64 {
        self.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_MILES)
    }
}

fn default_true() -> bool { true }

/// Inclusive age range a user accepts in a match. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 18, max: 65 }
    }
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A candidate profile with its compatibility score attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub compatibility: f64,
}

/// Per-term weights for the compatibility score
///
/// `age_closeness` is both the score for an exact age match and the
/// numerator of the `max(1, w / gap)` falloff for non-matching ages.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub interests: f64,
    pub activities: f64,
    pub availability: f64,
    pub age_closeness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 50.0,
            activities: 40.0,
            availability: 10.0,
            age_closeness: 30.0,
        }
    }
}
