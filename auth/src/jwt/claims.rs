use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token claims.
///
/// `sub` carries the subject identifier in its string form, as RFC 7519
/// requires; use [`Claims::subject_id`] to read it back as a typed id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Subject email at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `ttl` after `issued_at`.
    pub fn for_subject(
        subject: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Parse the subject into a typed identifier.
    pub fn subject_id<T: FromStr>(&self) -> Option<T> {
        self.sub.parse().ok()
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject(42, "a@x.com", now, Duration::hours(24));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_subject_id() {
        let claims = Claims::for_subject(7, "a@x.com", Utc::now(), Duration::hours(1));
        assert_eq!(claims.subject_id::<i32>(), Some(7));

        let claims = Claims {
            sub: "not-a-number".to_string(),
            ..claims
        };
        assert_eq!(claims.subject_id::<i32>(), None);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@x.com".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_serialized_shape() {
        let claims = Claims {
            sub: "1".to_string(),
            email: "a@x.com".to_string(),
            iat: 10,
            exp: 20,
        };

        let value = serde_json::to_value(&claims).expect("Failed to serialize claims");
        assert_eq!(
            value,
            serde_json::json!({ "sub": "1", "email": "a@x.com", "iat": 10, "exp": 20 })
        );
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims::for_subject(1, "a@x.com", Utc::now(), Duration::hours(24));
        let expires_at = claims.expires_at().expect("Expiry out of range");
        assert_eq!(expires_at.timestamp(), claims.exp);
    }
}
