use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use pitchdesk_core::users::{CredentialHasher, User};
use pitchdesk_core::{Error as CoreError, RecordId, Result as CoreResult};

use crate::error::ApiError;
use crate::main_lib::AppState;

const NO_TOKEN: &str = "No token, authorization denied";
const INVALID_TOKEN: &str = "Token is not valid";

/// Argon2id password hashing in PHC string format.
#[derive(Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> CoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Unexpected(format!("Failed to hash password: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> CoreResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| CoreError::Unexpected(format!("Invalid stored password hash: {e}")))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(other) => Err(CoreError::Unexpected(format!(
                "Password verification failed: {other}"
            ))),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized(NO_TOKEN.to_string()),
            AuthError::InvalidToken => ApiError::Unauthorized(INVALID_TOKEN.to_string()),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

/// Signs and validates HS256 bearer tokens whose subject is the user id.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
        }
    }

    pub fn issue_token(&self, user_id: RecordId) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the user id carried by a valid token.
    pub fn validate_token(&self, token: &str) -> Result<RecordId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;
        data.claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Accepts base64 for 32 bytes or a 32-character ASCII string.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Secret from `PD_JWT_SECRET`, or a fresh random key that does not survive
/// a restart.
pub fn resolve_secret(raw: Option<&str>) -> anyhow::Result<Vec<u8>> {
    match raw {
        Some(raw) => decode_secret_key(raw),
        None => {
            tracing::warn!("PD_JWT_SECRET not set; tokens will be invalidated on restart");
            let mut bytes = vec![0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            Ok(bytes)
        }
    }
}

/// The authenticated caller, inserted into request extensions by [`require_user`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> RecordId {
        self.0.id
    }
}

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;
    let user_id = state.auth.validate_token(token)?;
    let user = state.user_service.get_active_user(user_id)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hasher_round_trip() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("s3cret", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
        assert!(hasher.verify("s3cret", "not-a-hash").is_err());
    }

    #[test]
    fn tokens_carry_the_user_id() {
        let auth = AuthManager::new(&[7u8; 32], Duration::from_secs(60));
        let token = auth.issue_token(42).unwrap();
        assert_eq!(auth.validate_token(&token).unwrap(), 42);

        let other = AuthManager::new(&[8u8; 32], Duration::from_secs(60));
        assert!(matches!(
            other.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            auth.validate_token("garbage"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn secret_key_formats() {
        assert_eq!(decode_secret_key("0123456789-abcdefghij-0123456789").unwrap().len(), 32);
        assert_eq!(decode_secret_key(&BASE64.encode([1u8; 32])).unwrap(), vec![1u8; 32]);
        assert!(decode_secret_key("short").is_err());
        assert!(decode_secret_key("  ").is_err());
        assert_eq!(resolve_secret(None).unwrap().len(), 32);
    }
}
