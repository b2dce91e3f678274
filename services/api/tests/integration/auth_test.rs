use axum::http::StatusCode;
use serde_json::{Value, json};

use petmatch_domain::id::UserId;
use petmatch_domain::user::Role;
use petmatch_testing::auth::MockAuth;

use crate::helpers::{
    ADMIN_EMAIL, ADMIN_PASSWORD, PASSWORD, TEST_JWT_SECRET, adopter, login, register,
    test_server,
};

// ── POST /api/v1/auth/register ───────────────────────────────────────────────

#[tokio::test]
async fn should_register_adopter_with_completion_message() {
    let server = test_server().await;
    let resp = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Jane Doe",
            "email": "Jane@Example.com",
            "password": PASSWORD,
            "role": "adopter",
            "city": "Rosario",
        }))
        .await;

    resp.assert_status(StatusCode::CREATED);
    let body = resp.json::<Value>();
    assert_eq!(body["message"], "Registro completado.");
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert_eq!(body["user"]["role"], "adopter");
    assert_eq!(body["user"]["isApproved"], true);
    assert_eq!(body["user"]["city"], "Rosario");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn should_register_shelter_pending_review() {
    let server = test_server().await;
    let resp = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Happy Paws",
            "email": "paws@example.com",
            "password": PASSWORD,
            "role": "shelter",
            "shelterName": "Happy Paws Rescue",
        }))
        .await;

    resp.assert_status(StatusCode::CREATED);
    let body = resp.json::<Value>();
    assert_eq!(
        body["message"],
        "Tu cuenta de refugio será revisada por un administrador."
    );
    assert_eq!(body["user"]["isApproved"], false);
    assert_eq!(body["user"]["shelterName"], "Happy Paws Rescue");
}

#[tokio::test]
async fn should_reject_duplicate_email_ignoring_case() {
    let server = test_server().await;
    register(&server, "Jane", "jane@example.com", "adopter").await;

    let resp = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Jane Again",
            "email": "JANE@EXAMPLE.COM",
            "password": PASSWORD,
            "role": "shelter",
        }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "EMAIL_IN_USE");
}

#[tokio::test]
async fn should_reject_admin_self_registration() {
    let server = test_server().await;
    let resp = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "password": PASSWORD,
            "role": "admin",
        }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "UNSUPPORTED_ROLE");
}

#[tokio::test]
async fn should_reject_invalid_registration_input() {
    let server = test_server().await;
    for body in [
        json!({ "name": "J", "email": "j@example.com", "password": PASSWORD, "role": "adopter" }),
        json!({ "name": "Jane", "email": "nope", "password": PASSWORD, "role": "adopter" }),
        json!({ "name": "Jane", "email": "j@example.com", "password": "123", "role": "adopter" }),
        json!({ "name": "Jane", "email": "j@example.com", "password": PASSWORD }),
    ] {
        let resp = server.post("/api/v1/auth/register").json(&body).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>()["kind"], "VALIDATION", "{body}");
    }
}

// ── POST /api/v1/auth/login ──────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_folded_email() {
    let server = test_server().await;
    register(&server, "Jane", "jane@example.com", "adopter").await;

    let resp = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "  JANE@example.com", "password": PASSWORD }))
        .await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
    assert_eq!(body["user"]["email"], "jane@example.com");
}

#[tokio::test]
async fn should_fail_login_identically_for_unknown_email_and_wrong_password() {
    let server = test_server().await;
    register(&server, "Jane", "jane@example.com", "adopter").await;

    let unknown = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "ghost@example.com", "password": PASSWORD }))
        .await;
    let wrong = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "jane@example.com", "password": "not-the-password" }))
        .await;

    unknown.assert_status(StatusCode::UNAUTHORIZED);
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>(), wrong.json::<Value>());
    assert_eq!(unknown.json::<Value>()["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_check_password_before_shelter_approval() {
    let server = test_server().await;
    register(&server, "Happy Paws", "paws@example.com", "shelter").await;

    let pending = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "paws@example.com", "password": PASSWORD }))
        .await;
    pending.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(pending.json::<Value>()["kind"], "SHELTER_NOT_APPROVED");

    let wrong = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "paws@example.com", "password": "bad-password" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json::<Value>()["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_login_bootstrapped_admin() {
    let server = test_server().await;
    let token = login(&server, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let me = server
        .get("/api/v1/auth/me")
        .authorization_bearer(&token)
        .await;
    me.assert_status_ok();
    let user = &me.json::<Value>()["user"];
    assert_eq!(user["role"], "admin");
    assert_eq!(user["name"], "Platform Admin");
}

// ── GET /api/v1/auth/me ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_current_user() {
    let server = test_server().await;
    let jane = adopter(&server, "jane@example.com").await;

    let resp = server
        .get("/api/v1/auth/me")
        .authorization_bearer(&jane.token)
        .await;
    resp.assert_status_ok();
    let user = &resp.json::<Value>()["user"];
    assert_eq!(user["id"], jane.id);
    assert_eq!(user["email"], "jane@example.com");
}

#[tokio::test]
async fn should_reject_missing_expired_and_orphan_tokens() {
    let server = test_server().await;
    let jane = adopter(&server, "jane@example.com").await;
    let jane_auth = MockAuth::new(UserId(jane.id as i32), Role::Adopter, TEST_JWT_SECRET);
    let ghost_auth = MockAuth::new(UserId(9_999), Role::Adopter, TEST_JWT_SECRET);
    let foreign_auth = MockAuth::new(UserId(jane.id as i32), Role::Adopter, "other-secret");

    let missing = server.get("/api/v1/auth/me").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>()["kind"], "AUTHENTICATION_REQUIRED");

    for token in [
        jane_auth.expired_token(),
        ghost_auth.token(),
        foreign_auth.token(),
    ] {
        let resp = server
            .get("/api/v1/auth/me")
            .authorization_bearer(&token)
            .await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(resp.json::<Value>()["kind"], "AUTHENTICATION_REQUIRED");
    }

    // sanity: a fresh token for the same account works
    server
        .get("/api/v1/auth/me")
        .authorization_bearer(jane_auth.token())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_use_current_role_not_token_role() {
    let server = test_server().await;
    let jane = adopter(&server, "jane@example.com").await;
    // token claims admin, the account is an adopter
    let forged = MockAuth::new(UserId(jane.id as i32), Role::Admin, TEST_JWT_SECRET);

    let resp = server
        .get("/api/v1/admin/users")
        .authorization_bearer(forged.token())
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "INSUFFICIENT_PERMISSIONS");
}
