use crate::core::{
    filters::filter_candidates,
    scoring::{compatibility_score, ScoreError},
};
use crate::models::{RankedMatch, ScoringWeights, UserProfile};

/// Result of the matching pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<RankedMatch>,
    /// Size of the pool before filtering
    pub total_candidates: usize,
}

/// Matching pipeline: filter the pool, score survivors, rank by score
///
/// Synchronous and pure over an already-fetched pool; the caller owns fetch
/// timing, caching, and refresh. Invocations for different requesters share
/// no state and may run concurrently.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Find matches for a requester within an active-user pool
    ///
    /// The pool is expected to already exclude the requester's own id (the
    /// directory query does that). Returns the full ranked list, sorted by
    /// compatibility descending; the sort is stable, so candidates with
    /// equal scores keep their pool order. Truncation to a page size is the
    /// caller's concern.
    ///
    /// # Errors
    /// `ScoreError::MissingAge` if the requester has no age. Candidates
    /// cannot trigger it: the filter fills their default before scoring.
    pub fn find_matches(
        &self,
        requester: &UserProfile,
        pool: Vec<UserProfile>,
    ) -> Result<MatchResult, ScoreError> {
        let total_candidates = pool.len();

        let candidates = filter_candidates(requester, pool);

        let mut matches = Vec::with_capacity(candidates.len());
        for profile in candidates {
            let compatibility = compatibility_score(requester, &profile, &self.weights)?;
            matches.push(RankedMatch {
                profile,
                compatibility,
            });
        }

        // sort_by is stable: ties retain their relative pool order
        matches.sort_by(|a, b| {
            b.compatibility
                .partial_cmp(&a.compatibility)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(MatchResult {
            matches,
            total_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, GeoPoint};

    fn candidate(id: &str, age: u32, interests: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: Some(format!("User {}", id)),
            age: Some(age),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            preferred_activities: vec![],
            available_days: vec![],
            age_range: None,
            max_distance: None,
            location: None,
            is_active: true,
            bio: None,
            created_at: None,
        }
    }

    fn requester() -> UserProfile {
        let mut p = candidate("requester", 28, &["hiking", "coffee"]);
        p.age_range = Some(AgeRange { min: 25, max: 35 });
        p.max_distance = Some(25.0);
        p.location = Some(GeoPoint {
            latitude: 34.05,
            longitude: -118.24,
        });
        p
    }

    #[test]
    fn test_find_matches_filters_and_ranks() {
        let matcher = Matcher::with_default_weights();
        let requester = requester();

        let pool = vec![
            candidate("low", 30, &[]),
            candidate("high", 28, &["hiking", "coffee"]),
            candidate("too_old", 50, &["hiking"]),
        ];

        let result = matcher.find_matches(&requester, pool).unwrap();

        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].profile.id, "high");
        assert_eq!(result.matches[1].profile.id, "low");
        assert!(result.matches[0].compatibility > result.matches[1].compatibility);
    }

    #[test]
    fn test_equal_scores_keep_pool_order() {
        let matcher = Matcher::with_default_weights();
        let requester = requester();

        let pool = vec![
            candidate("first", 30, &["hiking"]),
            candidate("second", 30, &["coffee"]),
            candidate("third", 30, &["hiking"]),
        ];

        let result = matcher.find_matches(&requester, pool).unwrap();
        let ids: Vec<&str> = result.matches.iter().map(|m| m.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_pool_is_empty_result_not_error() {
        let matcher = Matcher::with_default_weights();
        let result = matcher.find_matches(&requester(), vec![]).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_requester_without_age_is_rejected() {
        let matcher = Matcher::with_default_weights();
        let mut requester = requester();
        requester.age = None;

        let err = matcher
            .find_matches(&requester, vec![candidate("c", 30, &[])])
            .unwrap_err();
        assert!(matches!(err, ScoreError::MissingAge(_)));
    }

    #[test]
    fn test_candidate_without_age_scores_with_default() {
        let matcher = Matcher::with_default_weights();
        let requester = requester();

        let mut ageless = candidate("ageless", 0, &[]);
        ageless.age = None;

        let result = matcher.find_matches(&requester, vec![ageless]).unwrap();
        assert_eq!(result.matches.len(), 1);
        // Requester is 28, default age is 25: age term is 30/3 = 10
        assert_eq!(result.matches[0].compatibility, 10.0);
    }
}
