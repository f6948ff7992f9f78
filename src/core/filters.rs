use crate::core::distance::haversine_miles;
use crate::models::UserProfile;

/// Check whether a candidate passes the requester's hard eligibility gates
///
/// The check is one-directional: the candidate's raw attributes are tested
/// against the requester's stated preferences. The candidate's own
/// `ageRange`/`maxDistance` are not consulted here.
///
/// Gates:
/// * candidate must be active
/// * candidate's age (default 25) must fall inside the requester's accepted
///   age range (default {18, 65})
/// * if both profiles carry a location, the great-circle distance must be
///   within the requester's max distance (default 25 miles); a missing
///   location on either side disables the distance gate for that pair
#[inline]
pub fn is_eligible(requester: &UserProfile, candidate: &UserProfile) -> bool {
    if !candidate.is_active {
        return false;
    }

    let range = requester.accepted_age_range();
    let candidate_age = candidate.age_or_default();
    if candidate_age < range.min || candidate_age > range.max {
        return false;
    }

    if let (Some(here), Some(there)) = (&requester.location, &candidate.location) {
        let distance = haversine_miles(
            here.latitude,
            here.longitude,
            there.latitude,
            there.longitude,
        );
        if distance > requester.max_distance_miles() {
            return false;
        }
    }

    true
}

/// Filter a candidate pool down to profiles eligible for the requester
///
/// Pool order is preserved. Survivors leave with a concrete age: the signup
/// default is filled in here so the scorer downstream never sees a missing
/// one. Pure over its inputs, never fails.
pub fn filter_candidates(requester: &UserProfile, pool: Vec<UserProfile>) -> Vec<UserProfile> {
    pool.into_iter()
        .filter(|candidate| is_eligible(requester, candidate))
        .map(|mut candidate| {
            candidate.age = Some(candidate.age_or_default());
            candidate
        })
        .collect()
}
