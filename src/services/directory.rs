use crate::models::UserProfile;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the user directory
///
/// Any of these surfaced from a pool fetch means "directory unavailable":
/// the caller must not confuse them with an empty (but successful) pool.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("directory returned error: {0}")]
    ApiError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the backend-as-a-service user directory
///
/// The surrounding app owns writes (signup, profile setup); this service
/// only queries. Two operations are needed:
/// - fetching a single profile by id
/// - fetching the active-user pool for one matching computation
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    users_collection: String,
    client: Client,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        users_collection: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            users_collection,
            client,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.users_collection
        )
    }

    /// Fetch a single profile by user id
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, DirectoryError> {
        let queries = vec![format!("equal(\"id\", \"{}\")", user_id)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        let url = format!(
            "{}?query={}",
            self.documents_url(),
            urlencoding::encode(&queries_json)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .header("X-Project-Id", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents.first().ok_or_else(|| {
            DirectoryError::NotFound(format!("Profile not found for user {}", user_id))
        })?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the pool of active profiles, excluding the given user id
    ///
    /// Only `isActive == true` documents are returned. The exclusion is also
    /// re-applied client-side in case the directory ignores the query.
    pub async fn get_active_user_pool(
        &self,
        exclude_user_id: &str,
    ) -> Result<Vec<UserProfile>, DirectoryError> {
        let queries = vec![
            "equal(\"isActive\", true)".to_string(),
            format!("notEqual(\"id\", \"{}\")", exclude_user_id),
        ];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        let url = format!(
            "{}?query={}",
            self.documents_url(),
            urlencoding::encode(&queries_json)
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .header("X-Project-Id", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch user pool: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let pool: Vec<UserProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<UserProfile>(data.clone()) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!("Skipping unparsable profile document: {}", e);
                        None
                    }
                }
            })
            .filter(|p| p.is_active && p.id != exclude_user_id)
            .collect();

        tracing::debug!(
            "Fetched {} active profiles (excluding {})",
            pool.len(),
            exclude_user_id
        );

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_client_creation() {
        let client = DirectoryClient::new(
            "https://directory.test/v1".to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            "users".to_string(),
        );

        assert_eq!(client.base_url, "https://directory.test/v1");
        assert_eq!(
            client.documents_url(),
            "https://directory.test/v1/databases/test_db/collections/users/documents"
        );
    }
}
