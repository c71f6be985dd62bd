use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use shared::{Profile, ProfilePayload};
use tracing::debug;

use super::error::SyncError;
use super::traits::ProfileSyncGateway;
use crate::config::ClientConfig;

/// Gateway for the `/stars` REST collection
#[derive(Clone)]
pub struct HttpProfileGateway {
    client: Client,
    base_url: String,
}

impl HttpProfileGateway {
    /// Create a gateway using the configured base URL and request timeout
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SyncError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/stars", self.base_url)
    }

    /// URL of one profile; the id is percent-encoded as a single path segment
    fn profile_url(&self, id: &str) -> Result<Url, SyncError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SyncError::network(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| SyncError::network(format!("Invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .push("stars")
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, SyncError> {
        request
            .send()
            .await
            .map_err(|e| SyncError::network(format!("Network error: {}", e)))
    }

    /// Map a non-success response to the error taxonomy
    async fn error_from_response(response: Response, id: Option<&str>) -> SyncError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        let message = if body.is_empty() {
            format!("Request failed with status code {}", status.as_u16())
        } else {
            body.to_string()
        };

        if status == StatusCode::NOT_FOUND {
            SyncError::NotFound(id.map(str::to_string).unwrap_or(message))
        } else if status.is_client_error() {
            SyncError::ServerRejected(message)
        } else {
            SyncError::Network(message)
        }
    }
}

#[async_trait]
impl ProfileSyncGateway for HttpProfileGateway {
    async fn list(&self) -> Result<Vec<Profile>, SyncError> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response, None).await);
        }

        response
            .json::<Vec<Profile>>()
            .await
            .map_err(|e| SyncError::network(format!("Failed to parse profiles: {}", e)))
    }

    async fn create(&self, payload: &ProfilePayload) -> Result<Profile, SyncError> {
        let url = self.collection_url();
        debug!("POST {} ({})", url, payload.name);

        let response = self.send(self.client.post(&url).json(payload)).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response, None).await);
        }

        response
            .json::<Profile>()
            .await
            .map_err(|e| SyncError::network(format!("Failed to parse created profile: {}", e)))
    }

    async fn delete(&self, id: &str) -> Result<(), SyncError> {
        let url = self.profile_url(id)?;
        debug!("DELETE {}", url);

        let response = self.send(self.client.delete(url)).await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response, Some(id)).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let gateway = HttpProfileGateway::with_client(Client::new(), "http://localhost:3000/");

        assert_eq!(gateway.base_url(), "http://localhost:3000");
        assert_eq!(gateway.collection_url(), "http://localhost:3000/stars");
        assert_eq!(
            gateway.profile_url("abc").unwrap().as_str(),
            "http://localhost:3000/stars/abc"
        );
    }

    #[test]
    fn test_profile_url_encodes_id_as_one_segment() {
        let gateway = HttpProfileGateway::with_client(Client::new(), "http://localhost:3000/api");

        assert_eq!(
            gateway.profile_url("a/b?c#d").unwrap().as_str(),
            "http://localhost:3000/api/stars/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn test_new_uses_configured_base_url() {
        let config = ClientConfig {
            api_base_url: "http://stars.internal:8080".to_string(),
            ..ClientConfig::default()
        };

        let gateway = HttpProfileGateway::new(&config).unwrap();

        assert_eq!(gateway.base_url(), "http://stars.internal:8080");
    }
}
