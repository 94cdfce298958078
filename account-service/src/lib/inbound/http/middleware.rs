use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Request header carrying the access token.
pub const TOKEN_HEADER: &str = "x-jwt-token";

/// Middleware that runs the authorization gate for `/account/:id` routes and
/// adds the authorized account to request extensions.
pub async fn authorize(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let authorized = state
        .authorization_gate
        .authorize(token.as_deref(), &id)
        .await
        .map_err(|denied| {
            tracing::warn!(
                method = %req.method(),
                uri = %req.uri(),
                reason = %denied,
                "Authorization denied"
            );
            ApiError::from(denied)
        })?;

    req.extensions_mut().insert(authorized);

    Ok(next.run(req).await)
}
