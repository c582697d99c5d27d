use serde_json::json;

use crate::error_handling::types::ClientError;
use crate::storage::types::{Animal, FactRecord};
use crate::web_interface::types::{ApiMessage, HealthResponse};

/// Typed client for the fact store HTTP API.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// POST /api/facts
    pub async fn save_fact(&self, text: &str, animal: Animal) -> Result<FactRecord, ClientError> {
        let url = format!("{}/api/facts", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "text": text, "animal": animal }))
            .send()
            .await
            .map_err(send_error)?;
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Api(e.to_string()))
        } else {
            Err(api_error(response).await)
        }
    }

    /// GET /api/facts
    pub async fn list_facts(&self) -> Result<Vec<FactRecord>, ClientError> {
        let url = format!("{}/api/facts", self.base_url);
        let response = self.http.get(&url).send().await.map_err(send_error)?;
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Api(e.to_string()))
        } else {
            Err(api_error(response).await)
        }
    }

    /// DELETE /api/facts/{id}, returning the confirmation message.
    pub async fn delete_fact(&self, id: &str) -> Result<String, ClientError> {
        let url = format!("{}/api/facts/{}", self.base_url, id);
        let response = self.http.delete(&url).send().await.map_err(send_error)?;
        if response.status().is_success() {
            let confirmation: ApiMessage = response
                .json()
                .await
                .map_err(|e| ClientError::Api(e.to_string()))?;
            Ok(confirmation.message)
        } else {
            Err(api_error(response).await)
        }
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.http.get(&url).send().await.map_err(send_error)?;
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Api(e.to_string()))
        } else {
            Err(api_error(response).await)
        }
    }
}

/// Connect-level failures get their own variant so callers can hint that
/// the service may not be running.
fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::Unreachable(e.to_string())
    } else {
        ClientError::Api(e.to_string())
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.json::<ApiMessage>().await {
        Ok(body) => ClientError::Api(body.message),
        Err(_) => ClientError::Api(format!("unexpected status {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = StoreClient::new("http://localhost:3001///");
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[tokio::test]
    async fn down_service_is_reported_as_unreachable() {
        let client = StoreClient::new("http://127.0.0.1:9");
        match client.list_facts().await {
            Err(ClientError::Unreachable(_)) => {}
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }
}
