use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::account::errors::AccessDenied;
use crate::account::errors::AccountError;
use crate::domain::account::models::Account;

pub mod create_account;
pub mod delete_account;
pub mod get_account;
pub mod list_accounts;
pub mod login;

/// Message returned for every token problem; the precise reason is only logged.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission denied";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timeout";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    RequestTimeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AccountError::InvalidEmail(_)
            | AccountError::InvalidAccountId(_)
            | AccountError::EmptyPassword => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::StoreUnavailable(_) | AccountError::Database(_) => {
                tracing::error!(error = %err, "Account store failure");
                ApiError::BadRequest(err.to_string())
            }
            AccountError::Password(_) | AccountError::Token(_) | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Internal error");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::MissingToken | AccessDenied::InvalidToken(_) => {
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            }
            AccessDenied::PermissionDenied => {
                ApiError::Unauthorized(PERMISSION_DENIED_MESSAGE.to_string())
            }
            AccessDenied::BadResourceId(_) => ApiError::BadRequest(denied.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.0,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.as_str().to_string(),
            number: account.number,
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}
