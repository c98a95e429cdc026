//! Integration tests for the Cipherkey client.
//!
//! These tests run the client against an in-process mock of the remote
//! encryption service. The mock decodes keys with a strict Base64 decoder and
//! enforces per-algorithm key lengths the way the real service does.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use cipherkey_client::types::ErrorResponse;
use cipherkey_client::{
    ClientConfig, DecryptedMessage, DecryptionRequest, EncryptedMessage, EncryptionRequest,
    HttpEncryptionService,
};
use cipherkey_core::Algorithm;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Token the mock service accepts.
pub const TEST_TOKEN: &str = "test-token";

// ============================================================================
// Mock Service
// ============================================================================

type ApiError = (StatusCode, Json<ErrorResponse>);

struct StoredMessage {
    id: i64,
    algorithm: Algorithm,
    key: Vec<u8>,
    message: String,
}

#[derive(Clone, Default)]
struct MockState {
    messages: Arc<Mutex<Vec<StoredMessage>>>,
}

/// An encryption service running on a random local port.
pub struct MockService {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockService {
    /// Start the mock service.
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind mock service")?;
        let addr: SocketAddr = listener.local_addr()?;

        let app = Router::new()
            .route("/api/encrypt", post(encrypt))
            .route("/api/decrypt", post(decrypt))
            .with_state(MockState::default());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            handle,
        })
    }

    /// A client authenticated with [`TEST_TOKEN`].
    pub fn client(&self) -> HttpEncryptionService {
        self.client_with_token(Some(TEST_TOKEN))
    }

    /// A client with an arbitrary token.
    pub fn client_with_token(&self, token: Option<&str>) -> HttpEncryptionService {
        let mut config = ClientConfig::new(&self.base_url);
        if let Some(token) = token {
            config = config.with_token(token);
        }
        HttpEncryptionService::new(config).expect("Failed to create HTTP client")
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn authorize(headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = format!("Bearer {}", TEST_TOKEN);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(api_error(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

/// Strict decode plus the service's own length rules.
fn service_key(algorithm: Algorithm, key: &str) -> Result<Vec<u8>, String> {
    let bytes = STANDARD
        .decode(key)
        .map_err(|e| format!("Invalid key format. The key must be Base64 encoded. Error: {e}"))?;

    let ok = match algorithm {
        Algorithm::Aes => matches!(bytes.len(), 16 | 24 | 32),
        Algorithm::ChaCha20 => bytes.len() == 32,
        Algorithm::Des => bytes.len() == 8,
    };

    if !ok {
        return Err(format!(
            "Invalid {} key length. Provided key is {} bytes.",
            algorithm,
            bytes.len()
        ));
    }

    Ok(bytes)
}

fn xor_with_key(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

async fn encrypt(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<EncryptionRequest>,
) -> Result<Json<EncryptedMessage>, ApiError> {
    authorize(&headers)?;

    let key = service_key(req.algorithm, req.key.as_str()).map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Encryption failed: {e}"))
    })?;

    let mut messages = state.messages.lock().unwrap();
    let id = messages.len() as i64 + 1;
    let encrypted_content = STANDARD.encode(xor_with_key(req.message.as_bytes(), &key));

    messages.push(StoredMessage {
        id,
        algorithm: req.algorithm,
        key,
        message: req.message.clone(),
    });

    Ok(Json(EncryptedMessage {
        id,
        title: req.title.clone(),
        encrypted_content,
        algorithm: req.algorithm,
        created_at: Some("2024-01-01T00:00:00".to_string()),
    }))
}

async fn decrypt(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<DecryptionRequest>,
) -> Result<Json<DecryptedMessage>, ApiError> {
    authorize(&headers)?;

    let messages = state.messages.lock().unwrap();
    let stored = messages
        .iter()
        .find(|m| m.id == req.message_id)
        .ok_or_else(|| {
            api_error(StatusCode::BAD_REQUEST, "Decryption failed: Message not found")
        })?;

    let key = service_key(stored.algorithm, req.key.as_str()).map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Decryption failed: {e}"))
    })?;

    if key != stored.key {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Decryption failed: Given final block not properly padded",
        ));
    }

    Ok(Json(DecryptedMessage {
        decrypted_message: stored.message.clone(),
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cipherkey_client::{
        decrypt_message, encrypt_message, ClientError, EncryptionService,
    };
    use cipherkey_core::{generate_key, is_valid_key, normalize};

    #[tokio::test]
    async fn test_des_password_round_trip() {
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let encrypted = encrypt_message(
            &client,
            Algorithm::Des,
            "my secret password",
            None,
            "attack at dawn",
            Some("orders"),
        )
        .await
        .unwrap();

        assert_eq!(encrypted.algorithm, Algorithm::Des);
        assert_eq!(encrypted.title.as_deref(), Some("orders"));

        let decrypted = decrypt_message(
            &client,
            Algorithm::Des,
            "my secret password",
            None,
            encrypted.id,
        )
        .await
        .unwrap();

        assert_eq!(decrypted.decrypted_message, "attack at dawn");
    }

    #[tokio::test]
    async fn test_generated_aes_key_round_trip() {
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let generated = generate_key(Algorithm::Aes, Some(128)).unwrap();
        assert!(is_valid_key(generated.key.as_str(), Some(Algorithm::Aes)));

        let encrypted = encrypt_message(
            &client,
            Algorithm::Aes,
            generated.key.as_str(),
            None,
            "hello",
            None,
        )
        .await
        .unwrap();

        let decrypted = decrypt_message(
            &client,
            Algorithm::Aes,
            generated.key.as_str(),
            None,
            encrypted.id,
        )
        .await
        .unwrap();

        assert_eq!(decrypted.decrypted_message, "hello");
    }

    #[tokio::test]
    async fn test_normalized_key_matches_typed_key() {
        // Encrypting with a password and decrypting with the normalized key
        // it maps to must work: both resolve to the same bytes.
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let encrypted = encrypt_message(&client, Algorithm::ChaCha20, "pw", None, "data", None)
            .await
            .unwrap();

        let key = normalize(Algorithm::ChaCha20, "pw", None).unwrap();
        let decrypted =
            decrypt_message(&client, Algorithm::ChaCha20, key.as_str(), None, encrypted.id)
                .await
                .unwrap();

        assert_eq!(decrypted.decrypted_message, "data");
    }

    #[tokio::test]
    async fn test_wrong_password_fails() {
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let encrypted = encrypt_message(&client, Algorithm::Des, "right", None, "msg", None)
            .await
            .unwrap();

        let result = decrypt_message(&client, Algorithm::Des, "wrong", None, encrypted.id).await;

        match result {
            Err(ClientError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("Decryption failed"));
            },
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chacha20_long_passwords_truncate() {
        // Only the first 32 bytes of a ChaCha20 password matter.
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let prefix = "0123456789abcdef0123456789abcdef";
        let encrypted = encrypt_message(
            &client,
            Algorithm::ChaCha20,
            &format!("{prefix}-first"),
            None,
            "msg",
            None,
        )
        .await
        .unwrap();

        let decrypted = decrypt_message(
            &client,
            Algorithm::ChaCha20,
            &format!("{prefix}-second"),
            None,
            encrypted.id,
        )
        .await
        .unwrap();

        assert_eq!(decrypted.decrypted_message, "msg");
    }

    #[tokio::test]
    async fn test_des_long_passwords_fold() {
        // DES folds every byte in, so a different tail gives a different key.
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let encrypted = encrypt_message(&client, Algorithm::Des, "abcdefgh-one", None, "msg", None)
            .await
            .unwrap();

        let result =
            decrypt_message(&client, Algorithm::Des, "abcdefgh-two", None, encrypted.id).await;

        assert!(matches!(result, Err(ClientError::Service { status: 400, .. })));
    }

    #[tokio::test]
    async fn test_whitespace_in_key_is_canonicalized() {
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let generated = generate_key(Algorithm::Des, None).unwrap();
        let text = generated.key.as_str();
        let (head, tail) = text.split_at(4);
        let messy = format!("  {head}\n{tail}  ");

        let encrypted = encrypt_message(&client, Algorithm::Des, &messy, None, "msg", None)
            .await
            .unwrap();

        let decrypted = decrypt_message(&client, Algorithm::Des, text, None, encrypted.id)
            .await
            .unwrap();

        assert_eq!(decrypted.decrypted_message, "msg");
    }

    #[tokio::test]
    async fn test_service_rejects_wrong_length_key() {
        // Bypass resolution and send a 16-byte key tagged DES.
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let request = EncryptionRequest {
            message: "msg".to_string(),
            algorithm: Algorithm::Des,
            key: generate_key(Algorithm::Aes, Some(128)).unwrap().key,
            title: None,
        };

        let result = client.encrypt(&request).await;

        match result {
            Err(ClientError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("Invalid DES key length"));
            },
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected() {
        let service = MockService::start().await.unwrap();
        let client = service.client_with_token(Some("nope"));

        let result = encrypt_message(&client, Algorithm::Des, "pw", None, "msg", None).await;

        match result {
            Err(ClientError::Service { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
            },
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_token() {
        let service = MockService::start().await.unwrap();
        let client = service.client_with_token(None);

        let result = encrypt_message(&client, Algorithm::Des, "pw", None, "msg", None).await;
        assert!(matches!(result, Err(ClientError::MissingToken)));
    }

    #[tokio::test]
    async fn test_unknown_message() {
        let service = MockService::start().await.unwrap();
        let client = service.client();

        let result = decrypt_message(&client, Algorithm::Aes, "pw", None, 999).await;

        match result {
            Err(ClientError::Service { message, .. }) => {
                assert!(message.contains("Message not found"));
            },
            other => panic!("expected service error, got {:?}", other),
        }
    }
}
