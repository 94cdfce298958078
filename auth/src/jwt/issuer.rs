use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;
use super::SIGNING_ALGORITHM;

/// Issues signed, time-bounded access tokens.
///
/// Tokens are HS256 JWTs carrying `sub`, `email`, `iat` and `exp`. Nothing is
/// stored server-side: an issued token stays valid until `exp`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create an issuer with the default 24 hour lifetime.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(Self::DEFAULT_TTL_HOURS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a subject, starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, email: &str) -> Result<String, JwtError> {
        self.issue_at(subject, email, Utc::now())
    }

    /// Issue a token for a subject with an explicit issuance instant.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, email, issued_at, self.ttl);
        self.sign(&claims)
    }

    /// Sign already-built claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(SIGNING_ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
