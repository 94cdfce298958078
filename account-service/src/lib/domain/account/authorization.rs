use std::sync::Arc;

use auth::Authenticator;

use crate::account::errors::AccessDenied;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthorizedAccount;

/// Per-request authorization check for account resources.
///
/// A caller may only act on the account whose id equals its token subject.
/// The target account is re-read from the store on every request, so a token
/// outliving its account is refused even though its signature still verifies.
#[derive(Clone)]
pub struct AuthorizationGate {
    authenticator: Arc<Authenticator>,
    accounts: Arc<dyn AccountServicePort>,
}

impl AuthorizationGate {
    pub fn new(authenticator: Arc<Authenticator>, accounts: Arc<dyn AccountServicePort>) -> Self {
        Self {
            authenticator,
            accounts,
        }
    }

    /// Decide whether the bearer of `token` may access account `resource_id`.
    ///
    /// # Arguments
    /// * `token` - Raw token from the request, if any
    /// * `resource_id` - Raw account id taken from the request path
    ///
    /// # Errors
    /// * `MissingToken` - No token presented
    /// * `InvalidToken` - Token failed validation, or the target account could not be loaded
    /// * `BadResourceId` - Path id is not an integer
    /// * `PermissionDenied` - Token subject differs from the target account
    pub async fn authorize(
        &self,
        token: Option<&str>,
        resource_id: &str,
    ) -> Result<AuthorizedAccount, AccessDenied> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or(AccessDenied::MissingToken)?;

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| AccessDenied::InvalidToken(e.to_string()))?;

        let subject: AccountId = claims.subject_id().ok_or_else(|| {
            AccessDenied::InvalidToken(format!("subject {:?} is not an account id", claims.sub))
        })?;

        let resource = AccountId::from_string(resource_id)
            .map_err(|_| AccessDenied::BadResourceId(resource_id.to_string()))?;

        // Lookup failures are reported like a bad token so callers cannot
        // probe which account ids exist.
        let account = self
            .accounts
            .get_account(&resource)
            .await
            .map_err(|e| AccessDenied::InvalidToken(format!("account lookup failed: {}", e)))?;

        if account.id != subject {
            return Err(AccessDenied::PermissionDenied);
        }

        Ok(AuthorizedAccount {
            account_id: account.id,
            email: claims.email,
        })
    }
}
