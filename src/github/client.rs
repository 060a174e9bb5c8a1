// GitHub GraphQL HTTP client.
// Handles bearer authentication and maps response status to errors.

use reqwest::{
    Client, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{PinpageError, Result};

use super::types::GraphQlRequest;

/// Client for a single GraphQL endpoint.
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    has_token: bool,
}

impl GraphQlClient {
    /// Create a client for `endpoint`, authenticating with `token` if present.
    pub fn new(endpoint: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| PinpageError::Config(format!("invalid token: {}", e)))?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("pinpage"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PinpageError::Http)?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            has_token: token.is_some(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST a query document and return the raw response body.
    pub async fn post_query(&self, query: &str) -> Result<String> {
        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query })
            .send()
            .await
            .map_err(PinpageError::Http)?;

        let response = self.check_response(response).await?;
        Ok(response.text().await?)
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED if !self.has_token => Err(PinpageError::MissingToken),
            StatusCode::UNAUTHORIZED => Err(PinpageError::Unauthorized),
            status => Err(PinpageError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
