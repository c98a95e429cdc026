//! HTTP implementation of the encryption service.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::service::EncryptionService;
use crate::types::{
    DecryptedMessage, DecryptionRequest, EncryptedMessage, EncryptionRequest, ErrorResponse,
};

/// Talks to the encryption service over HTTP with a bearer token.
pub struct HttpEncryptionService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpEncryptionService {
    /// Creates a service client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let token = self.token.as_ref().ok_or(ClientError::MissingToken)?;

        debug!(path, "sending request");
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();

    if !status.is_success() {
        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };
        warn!(status = status.as_u16(), %message, "service returned an error");
        return Err(ClientError::Service {
            status: status.as_u16(),
            message,
        });
    }

    Ok(resp.json().await?)
}

#[async_trait]
impl EncryptionService for HttpEncryptionService {
    async fn encrypt(&self, request: &EncryptionRequest) -> Result<EncryptedMessage, ClientError> {
        self.post("/api/encrypt", request).await
    }

    async fn decrypt(
        &self,
        request: &DecryptionRequest,
    ) -> Result<DecryptedMessage, ClientError> {
        self.post("/api/decrypt", request).await
    }
}
