use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::BoxError;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_account::create_account;
use super::handlers::delete_account::delete_account;
use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::ApiError;
use super::handlers::REQUEST_TIMEOUT_MESSAGE;
use super::middleware::authorize;
use crate::domain::account::authorization::AuthorizationGate;
use crate::domain::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authorization_gate: AuthorizationGate,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        authorization_gate: AuthorizationGate::new(authenticator, Arc::clone(&account_service)),
        account_service,
    };

    let public_routes = Router::new()
        .route("/login", post(login))
        .route("/account", get(list_accounts).post(create_account));

    let protected_routes = Router::new()
        .route("/account/:id", get(get_account).delete(delete_account))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Headers are left out of the span: they carry the access token.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let routes = Router::new().merge(public_routes).merge(protected_routes);

    with_request_timeout(routes, request_timeout)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bounds every request and answers an overrun with the usual JSON error body.
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let middlewares = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_error))
        .layer(TimeoutLayer::new(timeout));

    router.layer(middlewares)
}

async fn handle_error(err: BoxError) -> ApiError {
    if err.downcast_ref::<Elapsed>().is_some() {
        tracing::warn!(error = %err, "Request timeout exceeded");
        ApiError::RequestTimeout(REQUEST_TIMEOUT_MESSAGE.to_string())
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        ApiError::InternalServerError(err.to_string())
    }
}
