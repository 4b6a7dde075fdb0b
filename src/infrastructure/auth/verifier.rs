//! Bearer token verification
//!
//! Validates tokens issued by the external identity provider: HMAC-family
//! signature against a pre-shared secret, then issuer, audience, expiry
//! and subject, in that order, short-circuiting on the first failure.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::UserId;

/// Token verification failures. All of them map to HTTP 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("invalid Authorization header format")]
    MalformedHeader,

    #[error("invalid token")]
    MalformedToken,

    #[error("unexpected signing algorithm")]
    UnsupportedAlgorithm,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("invalid issuer")]
    InvalidIssuer,

    #[error("invalid audience")]
    InvalidAudience,

    #[error("token expired")]
    Expired,

    #[error("missing subject")]
    MissingSubject,
}

/// Verification parameters, loaded once at startup and immutable for the
/// process lifetime
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Pre-shared symmetric signing secret
    pub secret: String,
    /// Expected `iss` claim
    pub issuer: String,
    /// Expected `aud` claim
    pub audience: String,
}

impl VerifierConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

/// Claims decoded from a token before any value is trusted.
///
/// Every field is optional at the decoding stage; presence and values are
/// validated explicitly afterwards.
#[derive(Debug, Clone, Deserialize)]
struct Claims {
    iss: Option<String>,
    aud: Option<String>,
    exp: Option<i64>,
    sub: Option<String>,
}

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Stateless bearer token verifier.
///
/// Pure function of (token, current time, configured secret / issuer /
/// audience); holds no mutable state.
pub struct TokenVerifier {
    config: VerifierConfig,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl TokenVerifier {
    /// Create a new verifier with the given configuration
    pub fn new(config: VerifierConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Signature-only validation: issuer, audience and expiry are
        // checked explicitly below so each failure maps to its own error.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    /// Verify a raw bearer token (the portion after "Bearer ") and
    /// extract the subject identity
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify against an explicit clock
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;

        // Only the HMAC family is acceptable; anything else is an
        // algorithm-confusion attempt
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::UnsupportedAlgorithm);
        }

        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => AuthError::UnsupportedAlgorithm,
                    _ => AuthError::MalformedToken,
                }
            })?;
        let claims = data.claims;

        match claims.iss {
            Some(ref iss) if *iss == self.config.issuer => {}
            _ => return Err(AuthError::InvalidIssuer),
        }

        match claims.aud {
            Some(ref aud) if *aud == self.config.audience => {}
            _ => return Err(AuthError::InvalidAudience),
        }

        match claims.exp {
            Some(exp) if exp > now.timestamp() => {}
            _ => return Err(AuthError::Expired),
        }

        match claims.sub {
            Some(sub) => UserId::new(sub).map_err(|_| AuthError::MissingSubject),
            None => Err(AuthError::MissingSubject),
        }
    }
}

/// Extract the bearer token from an Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}
