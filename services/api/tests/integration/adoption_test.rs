use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{
    PASSWORD, adopter, admin_token, approved_shelter, create_pet, login, pet_body, register,
    test_server,
};

fn requests(body: Value) -> Vec<Value> {
    body["requests"].as_array().unwrap().clone()
}

#[tokio::test]
async fn should_run_full_adoption_flow() {
    let server = test_server().await;

    // shelter registers and cannot log in until approved
    let shelter = register(&server, "Happy Paws", "paws@example.com", "shelter").await;
    let shelter_id = shelter["id"].as_i64().unwrap();
    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "paws@example.com", "password": PASSWORD }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    server
        .post(&format!("/api/v1/admin/shelters/{shelter_id}/approve"))
        .authorization_bearer(admin_token(&server).await)
        .await
        .assert_status_ok();
    let shelter_token = login(&server, "paws@example.com", PASSWORD).await;

    // shelter lists a pet
    let resp = server
        .post("/api/v1/pets")
        .authorization_bearer(&shelter_token)
        .json(&pet_body("Luna", "dog", 2))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let pet_id = resp.json::<Value>()["pet"]["id"].as_i64().unwrap();

    // adopter asks for it
    let jane = adopter(&server, "jane@example.com").await;
    let resp = server
        .post(&format!("/api/v1/pets/{pet_id}/adoption-requests"))
        .authorization_bearer(&jane.token)
        .json(&json!({ "message": "We have a big garden" }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let request = resp.json::<Value>()["request"].clone();
    assert_eq!(request["status"], "pending");
    assert_eq!(request["adopterId"], jane.id);
    let request_id = request["id"].as_i64().unwrap();

    // shelter sees it with pet and adopter attached
    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&shelter_token)
        .await;
    resp.assert_status_ok();
    let listed = requests(resp.json::<Value>());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], request_id);
    assert_eq!(listed[0]["pet"]["name"], "Luna");
    assert_eq!(listed[0]["adopter"]["email"], "jane@example.com");
    assert!(listed[0]["adopter"].get("passwordHash").is_none());

    // shelter approves
    let resp = server
        .patch(&format!("/api/v1/adoption-requests/{request_id}"))
        .authorization_bearer(&shelter_token)
        .json(&json!({ "status": "approved" }))
        .await;
    resp.assert_status_ok();
    assert_eq!(resp.json::<Value>()["request"]["status"], "approved");

    // adopter sees the outcome
    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&jane.token)
        .await;
    let mine = requests(resp.json::<Value>());
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], "approved");
    assert_eq!(mine[0]["pet"]["id"], pet_id);

    // the pet itself is untouched
    let pet = server.get(&format!("/api/v1/pets/{pet_id}")).await;
    assert_eq!(pet.json::<Value>()["pet"]["status"], "available");
}

#[tokio::test]
async fn should_only_accept_requests_from_adopters() {
    let server = test_server().await;
    let shelter = approved_shelter(&server, "paws@example.com").await;
    let pet = create_pet(&server, &shelter, pet_body("Luna", "dog", 2)).await;
    let pet_id = pet["id"].as_i64().unwrap();

    let resp = server
        .post(&format!("/api/v1/pets/{pet_id}/adoption-requests"))
        .authorization_bearer(&shelter.token)
        .json(&json!({ "message": "mine" }))
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn should_reject_request_for_missing_pet() {
    let server = test_server().await;
    let jane = adopter(&server, "jane@example.com").await;

    let resp = server
        .post("/api/v1/pets/9999/adoption-requests")
        .authorization_bearer(&jane.token)
        .json(&json!({ "message": "hello" }))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "PET_NOT_FOUND");
}

#[tokio::test]
async fn should_allow_duplicate_requests_without_message() {
    let server = test_server().await;
    let shelter = approved_shelter(&server, "paws@example.com").await;
    let pet = create_pet(&server, &shelter, pet_body("Luna", "dog", 2)).await;
    let pet_id = pet["id"].as_i64().unwrap();
    let jane = adopter(&server, "jane@example.com").await;

    for _ in 0..2 {
        let resp = server
            .post(&format!("/api/v1/pets/{pet_id}/adoption-requests"))
            .authorization_bearer(&jane.token)
            .json(&json!({}))
            .await;
        resp.assert_status(StatusCode::CREATED);
        assert_eq!(resp.json::<Value>()["request"]["message"], "");
    }

    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&jane.token)
        .await;
    let mine = requests(resp.json::<Value>());
    assert_eq!(mine.len(), 2);
    // newest first
    assert!(mine[0]["id"].as_i64().unwrap() > mine[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn should_scope_shelter_listing_to_owned_pets() {
    let server = test_server().await;
    let paws = approved_shelter(&server, "paws@example.com").await;
    let other = approved_shelter(&server, "other@example.com").await;
    let luna = create_pet(&server, &paws, pet_body("Luna", "dog", 2)).await;
    let jane = adopter(&server, "jane@example.com").await;

    server
        .post(&format!("/api/v1/pets/{}/adoption-requests", luna["id"]))
        .authorization_bearer(&jane.token)
        .json(&json!({ "message": "hi" }))
        .await
        .assert_status(StatusCode::CREATED);

    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&other.token)
        .await;
    resp.assert_status_ok();
    assert!(requests(resp.json::<Value>()).is_empty());
}

#[tokio::test]
async fn should_reject_status_change_by_non_owner() {
    let server = test_server().await;
    let paws = approved_shelter(&server, "paws@example.com").await;
    let other = approved_shelter(&server, "other@example.com").await;
    let luna = create_pet(&server, &paws, pet_body("Luna", "dog", 2)).await;
    let jane = adopter(&server, "jane@example.com").await;

    let resp = server
        .post(&format!("/api/v1/pets/{}/adoption-requests", luna["id"]))
        .authorization_bearer(&jane.token)
        .json(&json!({ "message": "hi" }))
        .await;
    let request_id = resp.json::<Value>()["request"]["id"].as_i64().unwrap();

    let resp = server
        .patch(&format!("/api/v1/adoption-requests/{request_id}"))
        .authorization_bearer(&other.token)
        .json(&json!({ "status": "rejected" }))
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "SHELTER_OWNERSHIP");

    let resp = server
        .patch(&format!("/api/v1/adoption-requests/{request_id}"))
        .authorization_bearer(&paws.token)
        .json(&json!({ "status": "maybe" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "VALIDATION");

    let resp = server
        .patch("/api/v1/adoption-requests/9999")
        .authorization_bearer(&paws.token)
        .json(&json!({ "status": "approved" }))
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["kind"], "REQUEST_NOT_FOUND");
}

#[tokio::test]
async fn should_deny_request_listing_to_admin() {
    let server = test_server().await;
    let admin = admin_token(&server).await;

    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&admin)
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(resp.json::<Value>()["kind"], "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn should_drop_requests_with_deleted_pet() {
    let server = test_server().await;
    let paws = approved_shelter(&server, "paws@example.com").await;
    let luna = create_pet(&server, &paws, pet_body("Luna", "dog", 2)).await;
    let jane = adopter(&server, "jane@example.com").await;

    server
        .post(&format!("/api/v1/pets/{}/adoption-requests", luna["id"]))
        .authorization_bearer(&jane.token)
        .json(&json!({ "message": "hi" }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .delete(&format!("/api/v1/pets/{}", luna["id"]))
        .authorization_bearer(&paws.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let resp = server
        .get("/api/v1/adoption-requests")
        .authorization_bearer(&jane.token)
        .await;
    resp.assert_status_ok();
    assert!(requests(resp.json::<Value>()).is_empty());
}
