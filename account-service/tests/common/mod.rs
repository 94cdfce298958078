use std::sync::Arc;
use std::time::Duration;

use account_service::domain::account::service::AccountService;
use account_service::inbound::http::middleware::TOKEN_HEADER;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountStore;
use auth::Authenticator;
use auth::HashCost;
use auth::SigningSecret;
use auth::TokenIssuer;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Cheap Argon2 cost so the suites stay fast.
pub const TEST_HASH_COST: HashCost = HashCost {
    memory_kib: 1024,
    iterations: 1,
    parallelism: 1,
};

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let secret = SigningSecret::new(TEST_SECRET).expect("Test secret should be valid");
        let authenticator = Arc::new(
            Authenticator::with_settings(&secret, chrono::Duration::hours(24), TEST_HASH_COST)
                .expect("Failed to create authenticator"),
        );

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(account_service, authenticator, Duration::from_secs(10));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(&secret),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the access token header
    pub fn get_authorized(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(TOKEN_HEADER, token)
    }

    /// Helper to make DELETE request with the access token header
    pub fn delete_authorized(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).header(TOKEN_HEADER, token)
    }

    /// Open an account and return the created account body
    pub async fn create_account(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/account")
            .json(&json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Login response should carry a token")
            .to_string()
    }
}
