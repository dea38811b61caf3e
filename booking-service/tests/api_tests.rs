mod common;

use auth::PasswordHasher;
use booking_service::config::RouteAccess;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_ping() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/ping").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "server running");
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "name": "A", "email": "a@x.com", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("Missing token");
    assert!(!token.is_empty());

    let response = app
        .get_authenticated("/api/auth/me", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["name"], "A");
    assert!(body.get("password_hash").is_none());

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register_and_login("A", "a@x.com", "pw123").await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "name": "B", "email": "A@X.com", "password": "other" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "name": "A", "email": "not-an-email", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register_and_login("A", "a@x.com", "pw123").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "a@x.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "ghost@x.com", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_reject_bad_authorization() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let missing = app.get("/api/users").send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = missing.json().await.unwrap();
    assert!(body["error"].is_string());

    let wrong_scheme = app
        .get("/api/users")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_scheme.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .get_authenticated("/api/users", "not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_signature_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let signature_start = token.rfind('.').unwrap() + 1;
    for position in signature_start..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[position] = if bytes[position] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let response = app
            .get_authenticated("/api/auth/me", &tampered)
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "signature byte {} was changed",
            position - signature_start
        );
    }
}

#[tokio::test]
async fn test_token_for_deleted_user_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let me: Value = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = me["id"].as_str().unwrap();

    let response = app
        .delete_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_requires_current_password() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let original_hash = app.store.password_hash_of("a@x.com").await.unwrap();

    let response = app
        .put_authenticated("/api/auth/update-profile", &token)
        .json(&json!({ "current_password": "wrong", "new_password": "newpass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        app.store.password_hash_of("a@x.com").await.unwrap(),
        original_hash
    );

    let response = app
        .put_authenticated("/api/auth/update-profile", &token)
        .json(&json!({ "new_password": "newpass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .put_authenticated("/api/auth/update-profile", &token)
        .json(&json!({ "name": "Ana", "current_password": "pw123", "new_password": "newpass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());

    let stored = app.store.password_hash_of("a@x.com").await.unwrap();
    assert!(PasswordHasher::new().verify("newpass", &stored).unwrap());

    let new_token = app.login("a@x.com", "newpass").await;
    let me: Value = app
        .get_authenticated("/api/auth/me", &new_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["name"], "Ana");
}

#[tokio::test]
async fn test_user_crud() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("Admin", "admin@x.com", "pw123").await;
    let role_id = app.store.add_role().await;

    let response = app
        .post_authenticated("/api/users", &token)
        .json(&json!({
            "name": "Bob",
            "email": "bob@x.com",
            "password": "secret",
            "role_id": role_id.to_string()
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["role_id"], role_id.to_string());
    assert!(created.get("password_hash").is_none());

    let list: Value = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);

    let response = app
        .put_authenticated(&format!("/api/users/{}", id), &token)
        .json(&json!({ "name": "Robert" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "Robert");
    assert_eq!(updated["email"], "bob@x.com");

    let response = app
        .put_authenticated(&format!("/api/users/{}", id), &token)
        .json(&json!({ "email": "admin@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/users/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_with_unknown_role_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("Admin", "admin@x.com", "pw123").await;

    let response = app
        .post_authenticated("/api/users", &token)
        .json(&json!({
            "name": "Bob",
            "email": "bob@x.com",
            "password": "secret",
            "role_id": uuid::Uuid::new_v4().to_string()
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_path_id() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let response = app
        .get_authenticated("/api/spaces/not-a-uuid", &token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_space_crud() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let id = app.create_space(&token, "Meeting Room A").await;

    let response = app
        .get_authenticated(&format!("/api/spaces/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let space: Value = response.json().await.unwrap();
    assert_eq!(space["name"], "Meeting Room A");
    assert_eq!(space["capacity"], 10);
    assert_eq!(space["location"], "Floor 1");

    let response = app
        .put_authenticated(&format!("/api/spaces/{}", id), &token)
        .json(&json!({ "capacity": 12 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let space: Value = response.json().await.unwrap();
    assert_eq!(space["capacity"], 12);
    assert_eq!(space["name"], "Meeting Room A");

    let response = app
        .put_authenticated(&format!("/api/spaces/{}", id), &token)
        .json(&json!({ "capacity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .delete_authenticated(&format!("/api/spaces/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .delete_authenticated(&format!("/api/spaces/{}", id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_lifecycle_and_overlap() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let space_id = app.create_space(&token, "Meeting Room A").await;

    let response = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z",
            "status": "confirmed"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_str().unwrap().to_string();
    assert_eq!(booking["status"], "confirmed");

    let me: Value = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(booking["user_id"], me["id"]);

    let overlapping = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T10:00:00Z",
            "ends_at": "2030-01-10T12:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(overlapping.status(), StatusCode::CONFLICT);

    let back_to_back = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T11:00:00Z",
            "ends_at": "2030-01-10T12:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(back_to_back.status(), StatusCode::CREATED);

    let response = app
        .put_authenticated(&format!("/api/bookings/{}", booking_id), &token)
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let freed = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:30:00Z",
            "ends_at": "2030-01-10T10:30:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(freed.status(), StatusCode::CREATED);

    let list: Value = app
        .get_authenticated("/api/bookings", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 3);

    let response = app
        .delete_authenticated(&format!("/api/bookings/{}", booking_id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_booking_validation() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let space_id = app.create_space(&token, "Meeting Room A").await;

    let inverted = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T11:00:00Z",
            "ends_at": "2030-01-10T09:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);

    let unknown_space = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": uuid::Uuid::new_v4().to_string(),
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_space.status(), StatusCode::BAD_REQUEST);

    let bad_status = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z",
            "status": "maybe"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_lifecycle() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let space_id = app.create_space(&token, "Meeting Room A").await;

    let booking: Value = app
        .post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let response = app
        .post_authenticated("/api/payments", &token)
        .json(&json!({ "booking_id": booking_id, "amount": 100.5, "method": "card", "status": "paid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let payment: Value = response.json().await.unwrap();
    let payment_id = payment["id"].as_str().unwrap().to_string();
    assert_eq!(payment["amount"], 100.5);
    assert_eq!(payment["method"], "card");

    let second = app
        .post_authenticated("/api/payments", &token)
        .json(&json!({ "booking_id": booking_id, "amount": 10.0, "method": "cash" }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let negative = app
        .post_authenticated("/api/payments", &token)
        .json(&json!({ "booking_id": booking_id, "amount": -1.0, "method": "cash" }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

    let response = app
        .put_authenticated(&format!("/api/payments/{}", payment_id), &token)
        .json(&json!({ "status": "refunded" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let payment: Value = response.json().await.unwrap();
    assert_eq!(payment["status"], "refunded");
    assert_eq!(payment["amount"], 100.5);

    // Deleting the booking takes its payment with it.
    let response = app
        .delete_authenticated(&format!("/api/bookings/{}", booking_id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.store.payment_count().await, 0);

    let response = app
        .get_authenticated(&format!("/api/payments/{}", payment_id), &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_space_cascades_to_bookings() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let space_id = app.create_space(&token, "Meeting Room A").await;

    app.post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(app.store.booking_count().await, 1);

    app.delete_authenticated(&format!("/api/spaces/{}", space_id), &token)
        .send()
        .await
        .unwrap();

    assert_eq!(app.store.booking_count().await, 0);
}

#[tokio::test]
async fn test_activity_is_logged_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let space_id = app.create_space(&token, "Meeting Room A").await;

    app.post_authenticated("/api/bookings", &token)
        .json(&json!({
            "space_id": space_id,
            "starts_at": "2030-01-10T09:00:00Z",
            "ends_at": "2030-01-10T11:00:00Z"
        }))
        .send()
        .await
        .unwrap();

    let response = app
        .get_authenticated("/api/logs", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let logs: Value = response.json().await.unwrap();
    let actions: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["action"].as_str().unwrap())
        .collect();

    assert_eq!(actions, vec!["booking_created", "login", "registration"]);
}

#[tokio::test]
async fn test_manual_log_entry() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;
    let me: Value = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = app
        .post_authenticated("/api/logs", &token)
        .json(&json!({ "user_id": me["id"], "action": "door_opened", "details": "Front door" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry: Value = response.json().await.unwrap();
    assert_eq!(entry["action"], "door_opened");
    assert_eq!(entry["user_id"], me["id"]);

    let response = app
        .post_authenticated("/api/logs", &token)
        .json(&json!({ "user_id": uuid::Uuid::new_v4().to_string(), "action": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logs_are_protected_by_default() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/logs").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logs_can_be_configured_public() {
    let app = TestApp::spawn_with(RouteAccess::Public).await;

    let response = app.get("/api/logs").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trailing_slash_is_accepted() {
    let app = TestApp::spawn().await;
    let token = app.register_and_login("A", "a@x.com", "pw123").await;

    let response = app
        .get_authenticated("/api/users/", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/ping/").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .api_client
        .request(reqwest::Method::OPTIONS, format!("{}/api/auth/login", app.address))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::spawn().await;
    app.register_and_login("A", "a@x.com", "pw123").await;

    let me_token = app.login("a@x.com", "pw123").await;
    let claims = app.authenticator.validate_token(&me_token).unwrap();

    let expired = auth::Authenticator::new(common::JWT_SECRET, -1)
        .issue_token(claims.sub, &claims.email)
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/api/auth/me", &expired)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
