mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_login_and_access_own_account_scenario() {
    let app = TestApp::spawn().await;

    let first = app.create_account("a@x.com", "secret123").await;
    let other = app.create_account("b@x.com", "secret456").await;
    let id = first["id"].as_i64().unwrap();
    let other_id = other["id"].as_i64().unwrap();

    // Login
    let response = app
        .post("/login")
        .json(&json!({ "email": "a@x.com", "password": "secret123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["email"], "a@x.com");
    let token = body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    // Own account
    let response = app
        .get_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64(), Some(id));
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["balance"], 0);
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));

    // Someone else's account with the same token
    let response = app
        .get_authorized(&format!("/account/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Permission denied" }));
}

#[tokio::test]
async fn test_create_account_success() {
    let app = TestApp::spawn().await;

    let body = app.create_account("nicola@example.com", "pass_word!").await;

    assert!(body["id"].is_i64());
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["lastName"], "Lovelace");
    assert_eq!(body["email"], "nicola@example.com");
    assert_eq!(body["balance"], 0);
    assert!(body["number"].is_i64());
    assert!(body["createdAt"].is_string());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_create_account_duplicate_email() {
    let app = TestApp::spawn().await;
    app.create_account("nicola@example.com", "pass_word!").await;

    let response = app
        .post("/account")
        .json(&json!({
            "firstName": "Nicola",
            "lastName": "Other",
            "email": "nicola@example.com",
            "password": "pass_word!2"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_account_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/account")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "not-an-email",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));
}

#[tokio::test]
async fn test_create_account_empty_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/account")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "a@x.com",
            "password": ""
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_accounts_hides_hashes() {
    let app = TestApp::spawn().await;
    app.create_account("a@x.com", "secret123").await;
    app.create_account("b@x.com", "secret456").await;

    let response = app
        .get("/account")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let accounts = body.as_array().expect("Expected an array");
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["email"], "a@x.com");
    assert_eq!(accounts[1]["email"], "b@x.com");
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_account("a@x.com", "Correct_Password!").await;

    let response = app
        .post("/login")
        .json(&json!({ "email": "a@x.com", "password": "Wrong_Password!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid credentials" }));
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({ "email": "nobody@x.com", "password": "whatever" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid credentials" }));
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .header("content-type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_account_missing_token() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;

    let response = app
        .get(&format!("/account/{}", account["id"]))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_get_account_garbage_token() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;

    let response = app
        .get_authorized(&format!("/account/{}", account["id"]), "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_get_account_token_signed_with_other_secret() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;
    let id = account["id"].as_i64().unwrap();

    let foreign = auth::TokenIssuer::new(
        &auth::SigningSecret::new("another-secret-key-that-is-not-the-server-one").unwrap(),
    );
    let token = foreign.issue(id, "a@x.com").unwrap();

    let response = app
        .get_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_get_account_expired_token() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;
    let id = account["id"].as_i64().unwrap();

    let token = app
        .token_issuer
        .issue_at(id, "a@x.com", Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .get_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_get_account_bad_id() {
    let app = TestApp::spawn().await;
    app.create_account("a@x.com", "secret123").await;
    let token = app.login("a@x.com", "secret123").await;

    let response = app
        .get_authorized("/account/abc", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "invalid id abc" }));
}

#[tokio::test]
async fn test_delete_own_account() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;
    let id = account["id"].as_i64().unwrap();
    let token = app.login("a@x.com", "secret123").await;

    let response = app
        .delete_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "deleted": id }));

    let response = app
        .get("/account")
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_token_of_deleted_account_rejected() {
    let app = TestApp::spawn().await;
    let account = app.create_account("a@x.com", "secret123").await;
    let id = account["id"].as_i64().unwrap();
    let token = app.login("a@x.com", "secret123").await;

    app.delete_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    // Signature and expiry are still fine, but the account is gone
    let response = app
        .get_authorized(&format!("/account/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid token" }));
}

#[tokio::test]
async fn test_cannot_delete_other_account() {
    let app = TestApp::spawn().await;
    app.create_account("a@x.com", "secret123").await;
    let other = app.create_account("b@x.com", "secret456").await;
    let token = app.login("a@x.com", "secret123").await;

    let response = app
        .delete_authorized(&format!("/account/{}", other["id"]), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Permission denied" }));

    // Still there
    let response = app
        .get("/account")
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}
