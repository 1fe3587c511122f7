mod common;

use chrono::DateTime;
use chrono::Utc;
use common::TestApp;
use common::ACCESS_TTL_SECS;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::spawn().await;
    let before = Utc::now();

    let body = app.sign_in("chan", "mypassword").await;

    let access_value = body["access_token"]["value"].as_str().unwrap();
    assert!(!access_value.is_empty());
    assert_eq!(body["access_token"]["user_id"], "1");

    let refresh_value = body["refresh_token"]["value"].as_str().unwrap();
    assert!(!refresh_value.is_empty());
    assert_eq!(body["refresh_token"]["user_id"], "1");

    // expire_at is now + access TTL, within test slack.
    let expire_at =
        DateTime::parse_from_rfc3339(body["access_token"]["expire_at"].as_str().unwrap())
            .expect("expire_at is not RFC3339")
            .with_timezone(&Utc);
    let ttl = (expire_at - before).num_seconds();
    assert!(
        (ACCESS_TTL_SECS - 2..=ACCESS_TTL_SECS + 2).contains(&ttl),
        "unexpected ttl: {ttl}"
    );

    // The signed value round-trips through the verifier.
    let claims = app.jwt_handler.decode(access_value).expect("Invalid token");
    assert_eq!(claims.user_id(), "1");
}

#[tokio::test]
async fn test_sign_in_never_reveals_which_credential_was_wrong() {
    let app = TestApp::spawn().await;

    let wrong_password = app
        .post("/api/auth/signin")
        .json(&json!({ "username": "chan", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/api/auth/signin")
        .json(&json!({ "username": "nobody", "password": "x" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: no user-enumeration oracle.
    let body_a = wrong_password.text().await.unwrap();
    let body_b = unknown_user.text().await.unwrap();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_sign_in_malformed_payload_is_unprocessable() {
    let app = TestApp::spawn().await;

    // Missing field
    let response = app
        .post("/api/auth/signin")
        .json(&json!({ "username": "chan" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Not JSON at all
    let response = app
        .post("/api/auth/signin")
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Empty credentials are a payload error, not an authentication attempt
    let response = app
        .post("/api/auth/signin")
        .json(&json!({ "username": "", "password": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_userinfo_with_bearer() {
    let app = TestApp::spawn().await;
    let body = app.sign_in("chan", "mypassword").await;
    let token = body["access_token"]["value"].as_str().unwrap();

    let response = app
        .get("/api/auth/userinfo")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["data"]["username"], "chan");

    // The echoed user carries no credential material.
    let text = serde_json::to_string(&body).unwrap();
    assert!(!text.contains("password"));
    assert!(!text.contains("salt"));
}

#[tokio::test]
async fn test_userinfo_missing_or_malformed_bearer() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/userinfo")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "missing bearer");

    let response = app
        .get("/api/auth/userinfo")
        .header("authorization", "Token abc")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "bearer has invalid content");
}

#[tokio::test]
async fn test_userinfo_with_tampered_token() {
    let app = TestApp::spawn().await;
    let body = app.sign_in("chan", "mypassword").await;
    let token = body["access_token"]["value"].as_str().unwrap();

    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .get("/api/auth/userinfo")
        .bearer_auth(&tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "invalid token");
}

#[tokio::test]
async fn test_userinfo_with_expired_token() {
    let app = TestApp::spawn().await;

    // A correctly signed token for a real user, already past expiry.
    let issue_at = Utc::now() - chrono::Duration::seconds(120);
    let expire_at = Utc::now() - chrono::Duration::seconds(60);
    let claims = auth::AccessClaims::new("expired-token-id", "1", issue_at, expire_at);
    let token = app.jwt_handler.encode(&claims).unwrap();

    let response = app
        .get("/api/auth/userinfo")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    // Expired is distinguishable from tampered.
    assert_eq!(body["data"]["message"], "expired token");
}

#[tokio::test]
async fn test_deleted_user_loses_access_immediately() {
    let app = TestApp::spawn().await;
    let body = app.sign_in("chan", "mypassword").await;
    let token = body["access_token"]["value"].as_str().unwrap();

    // The token is accepted while the user exists...
    let response = app
        .get("/api/auth/userinfo")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    use identity_service::identity::ports::CredentialStore;
    app.store.remove_user("1").await.unwrap();

    // ...and rejected the moment the user is gone, despite remaining valid
    // cryptographically.
    let response = app
        .get("/api/auth/userinfo")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_session_flow() {
    let app = TestApp::spawn().await;

    // Sign-in sets the session cookie on the shared client jar.
    let response = app
        .post("/api/auth/signin")
        .json(&json!({ "username": "chan", "password": "mypassword" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("; ");
    assert!(set_cookie.contains("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age"));

    // The cookie authenticates the web userinfo route with no bearer.
    let response = app
        .get("/api/web/userinfo")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["username"], "chan");

    // Sign-out clears the session cookie.
    let response = app
        .post("/api/auth/signout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"], "signed out");

    let response = app
        .get("/api/web/userinfo")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "missing session cookie");
}

#[tokio::test]
async fn test_sign_out_without_credential_is_a_noop() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/signout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"], "already signed out");
}

#[tokio::test]
async fn test_sign_out_bearer_removes_access_token() {
    let app = TestApp::spawn().await;
    let body = app.sign_in("chan", "mypassword").await;
    let token = body["access_token"]["value"].as_str().unwrap();

    use identity_service::identity::ports::CredentialStore;
    let claims = app.jwt_handler.decode(token).unwrap();
    assert!(app.store.get_access_token(claims.token_id()).await.is_ok());

    let response = app
        .post("/api/auth/signout")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // The record is gone from the store.
    assert!(app.store.get_access_token(claims.token_id()).await.is_err());

    // Signing out again with the same token is still a success.
    let response = app
        .post("/api/auth/signout")
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sign_out_accepts_expired_token() {
    let app = TestApp::spawn().await;

    let issue_at = Utc::now() - chrono::Duration::seconds(120);
    let expire_at = Utc::now() - chrono::Duration::seconds(60);
    let claims = auth::AccessClaims::new("stale-token-id", "1", issue_at, expire_at);
    let token = app.jwt_handler.encode(&claims).unwrap();

    // Revocation needs only a claimed identifier, not a live token.
    let response = app
        .post("/api/auth/signout")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}
