use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AuthorizedAccount;
use crate::inbound::http::router::AppState;

/// Runs behind the authorization middleware, which has already bound the
/// path id to the token subject.
pub async fn get_account(
    State(state): State<AppState>,
    Extension(authorized): Extension<AuthorizedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .get_account(&authorized.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
