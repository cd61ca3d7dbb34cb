//! HTTP-level rejections that are decided before any query runs.
//!
//! The server's pool points at a closed port, so a test passes only if the
//! request is answered without touching the database.

use dvdrental_api::services::tokens::TokenKind;
use dvdrental_core::{Role, Username};
use dvdrental_integration_tests::{TestServer, message};
use reqwest::StatusCode;

fn token(server: &TestServer, role: Role, kind: TokenKind) -> String {
    let username = Username::parse("alice").expect("valid username");
    server
        .state
        .token_keys()
        .issue(&username, role, kind)
        .expect("Failed to issue token")
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_is_ok_without_database() {
    let server = TestServer::without_database().await;

    let resp = server.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_readiness_reports_unavailable_database() {
    let server = TestServer::without_database().await;

    let resp = server.get("/health/ready", None).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let server = TestServer::without_database().await;

    let resp = server.get("/health", None).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(request_id.len(), 36);
    assert_eq!(
        resp.headers().get("x-content-type-options").map(|v| v.as_bytes()),
        Some(b"nosniff".as_slice())
    );

    let resp = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "upstream-123")
        .send()
        .await
        .expect("GET failed");
    assert_eq!(
        resp.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(b"upstream-123".as_slice())
    );
}

// ============================================================================
// Form validation
// ============================================================================

#[tokio::test]
async fn test_registration_names_missing_field() {
    let server = TestServer::without_database().await;

    let resp = server.post_form("/registration", &[], None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Missing required field: username");

    let resp = server
        .post_form("/registration", &[("username", "alice")], None)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Missing required field: password");

    let resp = server
        .post_form(
            "/registration",
            &[("username", "alice"), ("password", "   ")],
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Missing required field: password");
}

#[tokio::test]
async fn test_registration_rejects_unknown_role() {
    let server = TestServer::without_database().await;

    let resp = server
        .post_form(
            "/registration",
            &[("username", "alice"), ("password", "pw1"), ("role", "owner")],
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(message(resp).await.starts_with("Invalid value for role"));
}

#[tokio::test]
async fn test_admin_cannot_self_register() {
    let server = TestServer::without_database().await;

    let resp = server
        .post_form(
            "/registration",
            &[("username", "mallory"), ("password", "pw1"), ("role", "admin")],
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_body_without_form_content_type_is_rejected() {
    let server = TestServer::without_database().await;

    let resp = server
        .client
        .post(server.url("/login"))
        .body("username=alice&password=pw1")
        .send()
        .await
        .expect("POST failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!message(resp).await.is_empty());
}

#[tokio::test]
async fn test_login_names_missing_field() {
    let server = TestServer::without_database().await;

    let resp = server
        .post_form("/login", &[("username", "alice")], None)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Missing required field: password");
}

#[tokio::test]
async fn test_customer_update_validates_every_field() {
    let server = TestServer::without_database().await;

    let resp = server
        .put_form(
            "/customers",
            &[
                ("customer_id", "1"),
                ("first_name", "Mary"),
                ("last_name", "Smith"),
                ("email", "mary@example.org"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(message(resp).await, "Missing required field: create_date");

    let resp = server
        .put_form(
            "/customers",
            &[
                ("customer_id", "1"),
                ("first_name", "Mary"),
                ("last_name", "Smith"),
                ("email", "mary@example.org"),
                ("create_date", "yesterday"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(
        message(resp)
            .await
            .starts_with("Invalid value for create_date")
    );
}

#[tokio::test]
async fn test_customer_update_rejects_values_wider_than_columns() {
    let server = TestServer::without_database().await;
    let long_name = "x".repeat(60);

    let resp = server
        .put_form(
            "/customers",
            &[
                ("customer_id", "1"),
                ("first_name", &long_name),
                ("last_name", "Smith"),
                ("email", "mary@example.org"),
                ("create_date", "2006-02-14"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        message(resp).await,
        "Invalid value for first_name: must be at most 45 characters"
    );
}

#[tokio::test]
async fn test_registration_rejects_overlong_profile_name() {
    let server = TestServer::without_database().await;
    let long_name = "y".repeat(200);

    let resp = server
        .post_form(
            "/registration",
            &[
                ("username", "alice"),
                ("password", "pw1"),
                ("first_name", &long_name),
            ],
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(
        message(resp)
            .await
            .starts_with("Invalid value for first_name")
    );
}

#[tokio::test]
async fn test_customer_filter_rejects_non_numeric_store() {
    let server = TestServer::without_database().await;

    let resp = server.get("/customers?store_id=main", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Token checks
// ============================================================================

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let server = TestServer::without_database().await;

    let resp = server.get("/secret", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Missing Authorization header");

    let resp = server
        .client
        .get(server.url("/secret"))
        .header("authorization", "Basic YWxpY2U6cHcx")
        .send()
        .await
        .expect("GET failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let server = TestServer::without_database().await;

    let resp = server.get("/secret", Some("not.a.jwt")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Invalid token");
}

#[tokio::test]
async fn test_refresh_token_cannot_access_protected_route() {
    let server = TestServer::without_database().await;
    let refresh = token(&server, Role::User, TokenKind::Refresh);

    let resp = server.get("/secret", Some(&refresh)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Only access tokens are allowed");

    let resp = server.post_form("/logout/access", &[], Some(&refresh)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let server = TestServer::without_database().await;
    let access = token(&server, Role::User, TokenKind::Access);

    let resp = server.post_form("/token/refresh", &[], Some(&access)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Only refresh tokens are allowed");

    let resp = server.post_form("/logout/refresh", &[], Some(&access)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_bad_tokens_before_role_check() {
    let server = TestServer::without_database().await;

    let resp = server.get("/users", None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = server.delete("/users", Some("not.a.jwt")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Invalid token");

    let refresh = token(&server, Role::Admin, TokenKind::Refresh);
    let resp = server.get("/users", Some(&refresh)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message(resp).await, "Only access tokens are allowed");
}

#[tokio::test]
async fn test_admin_routes_consult_revocation_list_before_role() {
    let server = TestServer::without_database().await;
    let access = token(&server, Role::User, TokenKind::Access);

    // A 403 here would mean the role was judged on an unchecked token.
    let resp = server.get("/users", Some(&access)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unreachable_revocation_list_fails_closed() {
    let server = TestServer::without_database().await;
    let access = token(&server, Role::User, TokenKind::Access);

    let resp = server.get("/secret", Some(&access)).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message(resp).await, "Internal server error");
}
