use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse, UserProfile};
use crate::services::{CacheKey, CacheManager, DirectoryClient, DirectoryError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub max_limit: u16,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20
/// }
/// ```
///
/// An empty `matches` array is a successful "no eligible candidates" result;
/// directory failures come back as 503 so the client can tell the two apart.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = &req.user_id;
    let limit = req.limit.min(state.max_limit) as usize;

    tracing::info!("Finding matches for user: {}, limit: {}", user_id, limit);

    // Requester profile: cache first, then directory
    let requester = match fetch_profile(&state, user_id).await {
        Ok(profile) => profile,
        Err(e @ DirectoryError::NotFound(_)) => {
            tracing::info!("Requester {} not found in directory", user_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "unknown_user".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
        Err(e) => return directory_unavailable(user_id, e),
    };

    // Active-user pool snapshot, excluding the requester's own id
    let pool = match fetch_pool(&state, user_id).await {
        Ok(pool) => pool,
        Err(e) => return directory_unavailable(user_id, e),
    };

    tracing::debug!("Pool of {} candidates for {}", pool.len(), user_id);

    let result = match state.matcher.find_matches(&requester, pool) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Cannot score matches for {}: {}", user_id, e);
            return HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "invalid_input".to_string(),
                message: e.to_string(),
                status_code: 422,
            });
        }
    };

    // Ranking is the core's job; paging down to the requested limit is ours
    let total_matches = result.matches.len();
    let mut matches = result.matches;
    matches.truncate(limit);

    tracing::info!(
        "Returning {} of {} matches for user {} (pool of {})",
        matches.len(),
        total_matches,
        user_id,
        result.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_matches,
        total_candidates: result.total_candidates,
    })
}

async fn fetch_profile(state: &AppState, user_id: &str) -> Result<UserProfile, DirectoryError> {
    let key = CacheKey::profile(user_id);
    if let Ok(profile) = state.cache.get::<UserProfile>(&key).await {
        return Ok(profile);
    }

    let profile = state.directory.get_profile(user_id).await?;
    if let Err(e) = state.cache.set(&key, &profile).await {
        tracing::warn!("Failed to cache profile for {}: {}", user_id, e);
    }
    Ok(profile)
}

async fn fetch_pool(state: &AppState, user_id: &str) -> Result<Vec<UserProfile>, DirectoryError> {
    let key = CacheKey::pool(user_id);
    if let Ok(pool) = state.cache.get::<Vec<UserProfile>>(&key).await {
        return Ok(pool);
    }

    let pool = state.directory.get_active_user_pool(user_id).await?;
    if let Err(e) = state.cache.set(&key, &pool).await {
        tracing::warn!("Failed to cache pool for {}: {}", user_id, e);
    }
    Ok(pool)
}

fn directory_unavailable(user_id: &str, e: DirectoryError) -> HttpResponse {
    tracing::error!("Directory unavailable while matching {}: {}", user_id, e);
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "directory_unavailable".to_string(),
        message: e.to_string(),
        status_code: 503,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
