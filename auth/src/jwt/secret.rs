use std::fmt;

use super::errors::JwtError;

/// Symmetric signing secret shared by the issuer and the validator.
///
/// Built once at startup; an empty or whitespace-only secret is refused so a
/// misconfigured process fails before it serves a request.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Create a signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or only whitespace
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, JwtError> {
        let secret = secret.as_ref();

        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(JwtError::MissingSecret);
        }

        Ok(Self(secret.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
