use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Built once from the startup configuration and shared immutably between
/// requests.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    /// Hash checked when no stored credential exists.
    dummy_hash: OnceLock<String>,
}

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-subjects";

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default hashing cost and token lifetime.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret),
            token_validator: TokenValidator::new(secret),
            dummy_hash: OnceLock::new(),
        }
    }

    /// Create an authenticator with explicit hashing cost and token lifetime.
    ///
    /// # Errors
    /// * `PasswordError::InvalidCost` - Hashing cost is rejected by Argon2
    pub fn with_settings(
        secret: &SigningSecret,
        token_ttl: Duration,
        hash_cost: HashCost,
    ) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::with_cost(hash_cost)?;
        let dummy_hash = OnceLock::from(password_hasher.hash(DUMMY_PASSWORD)?);

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::new(secret).with_ttl(token_ttl),
            token_validator: TokenValidator::new(secret),
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// A stored hash that cannot be parsed counts as a credential mismatch.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(true) => {}
            Ok(false) | Err(PasswordError::MalformedHash(_)) => {
                return Err(AuthenticationError::InvalidCredentials)
            }
            Err(e) => return Err(e.into()),
        }

        let access_token = self.token_issuer.issue(subject, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Run one verification against a throwaway hash of the configured cost.
    ///
    /// Called when no account matches the login name, so that path costs the
    /// same as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> Result<(), PasswordError> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.password_hasher.hash(DUMMY_PASSWORD)?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };

        self.password_hasher.verify(password, hash).map(|_| ())
    }

    /// Issue a token without password verification.
    pub fn issue_token(&self, subject: impl ToString, email: &str) -> Result<String, JwtError> {
        self.token_issuer.issue(subject, email)
    }

    /// Validate and decode an access token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_validator.validate(token)
    }
}
