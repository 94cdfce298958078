use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::secret::SigningSecret;
use super::SIGNING_ALGORITHM;

/// Verifies access tokens produced by [`super::TokenIssuer`].
///
/// Checks run in a fixed order: header algorithm against the allow-list,
/// then signature and claim structure, then expiry.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked here with no leeway, see `validate_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `AlgorithmMismatch` - Header names an algorithm other than HS256
    /// * `InvalidSignature` - Signature does not match the configured secret
    /// * `MalformedToken` - Token or claims cannot be decoded
    /// * `ExpiredToken` - Current time is at or past `exp`
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token against an explicit Unix timestamp.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let header = decode_header(token)?;

        if header.alg != SIGNING_ALGORITHM {
            return Err(JwtError::AlgorithmMismatch(format!("{:?}", header.alg)));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.is_expired(now) {
            return Err(JwtError::ExpiredToken);
        }

        Ok(token_data.claims)
    }
}
