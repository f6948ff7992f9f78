use std::collections::HashSet;

use thiserror::Error;

use crate::models::{ScoringWeights, UserProfile};

/// Errors from the compatibility scorer
#[derive(Debug, Error)]
pub enum ScoreError {
    /// A profile reached the scorer without a concrete age. Default-filling
    /// happens in the candidate filter; a bare profile here is a caller bug,
    /// surfaced instead of silently propagating NaN through the ranking.
    #[error("profile {0} has no age")]
    MissingAge(String),
}

/// Calculate the compatibility score between two profiles
///
/// Additive, weighted, higher is better, no upper bound:
/// * shared interests × 50
/// * shared preferred activities × 40
/// * shared available days × 10
/// * age proximity: 30 for identical ages, otherwise `max(1, 30 / gap)`
///
/// Overlap terms are commutative and the age term uses the absolute gap,
/// so the score is symmetric in its two arguments. Collections are counted
/// set-wise: duplicated entries in a stored profile never double-count.
/// String comparison is exact and case-sensitive.
pub fn compatibility_score(
    requester: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> Result<f64, ScoreError> {
    let requester_age = requester
        .age
        .ok_or_else(|| ScoreError::MissingAge(requester.id.clone()))?;
    let candidate_age = candidate
        .age
        .ok_or_else(|| ScoreError::MissingAge(candidate.id.clone()))?;

    let mut score = 0.0;

    score += overlap_count(&requester.interests, &candidate.interests) as f64 * weights.interests;
    score += overlap_count(&requester.preferred_activities, &candidate.preferred_activities)
        as f64
        * weights.activities;
    score += overlap_count(&requester.available_days, &candidate.available_days) as f64
        * weights.availability;

    let gap = requester_age.abs_diff(candidate_age);
    score += if gap == 0 {
        weights.age_closeness
    } else {
        (weights.age_closeness / gap as f64).max(1.0)
    };

    Ok(score)
}

/// Number of distinct values present in both collections
#[inline]
fn overlap_count(left: &[String], right: &[String]) -> usize {
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    let right: HashSet<&str> = right.iter().map(String::as_str).collect();
    left.intersection(&right).count()
}
