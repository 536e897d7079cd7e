//! Account lifecycle: signup, login, profile updates, wishlist, deletion.

use reqwest::StatusCode;
use serde_json::json;

use paper_cart_integration_tests::TestServer;

#[tokio::test]
async fn test_signup_then_login() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_json(
            "/api/signup",
            &json!({"name": "Ann", "email": "ann@x.com", "password": "pw"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["name"], json!("Ann"));
    assert_eq!(body["user"]["wishlist"], json!([]));
    assert_eq!(body["user"]["isAdmin"], json!(false));
    // The credential must never appear in a response.
    assert!(body["user"].get("password").is_none());

    let (status, body) = server
        .post_json("/api/login", &json!({"email": "ann@x.com", "password": "pw"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], json!("ann@x.com"));

    let (status, body) = server
        .post_json(
            "/api/login",
            &json!({"email": "ann@x.com", "password": "wrong"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid email or password"));
}

#[tokio::test]
async fn test_signup_requires_all_fields() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_json("/api/signup", &json!({"name": "Ann", "email": "ann@x.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("All fields required"));
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let server = TestServer::spawn().await;
    let signup = json!({"name": "Ann", "email": "ann@x.com", "password": "pw"});

    let (status, _) = server.post_json("/api/signup", &signup).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = server.post_json("/api/signup", &signup).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Email already registered"));
}

#[tokio::test]
async fn test_malformed_body_hits_field_validation() {
    let server = TestServer::spawn().await;

    // Unparseable JSON is recovered to an empty body, which then fails
    // the ordinary required-field check rather than a parse error.
    let resp = server
        .client
        .post(server.url("/api/signup"))
        .header("content-type", "application/json")
        .body("{definitely not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.expect("Failed to decode body");
    assert_eq!(body["message"], json!("All fields required"));
}

#[tokio::test]
async fn test_users_listing_is_masked() {
    let server = TestServer::spawn().await;
    server
        .post_json(
            "/api/signup",
            &json!({"name": "Ann", "email": "ann@x.com", "password": "pw"}),
        )
        .await;

    let (status, body) = server.get_json("/api/users").await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], json!("ann@x.com"));
    assert!(users[0].get("createdAt").is_some());
    assert!(users[0].get("password").is_none());
    assert!(users[0].get("wishlist").is_none());
}

#[tokio::test]
async fn test_profile_update_skips_empty_fields_but_applies_empty_avatar() {
    let server = TestServer::spawn().await;
    let (_, body) = server
        .post_json(
            "/api/signup",
            &json!({"name": "Ann", "email": "ann@x.com", "password": "pw"}),
        )
        .await;
    let user_id = body["user"]["id"].clone();

    let (status, body) = server
        .post_json(
            "/api/profile/update",
            &json!({
                "userId": user_id,
                "name": "",
                "avatar": "/uploads/ann.png"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    // Empty name means "not supplied"; the avatar is applied.
    assert_eq!(body["user"]["name"], json!("Ann"));
    assert_eq!(body["user"]["avatar"], json!("/uploads/ann.png"));

    // An explicitly-empty avatar clears it again.
    let (_, body) = server
        .post_json(
            "/api/profile/update",
            &json!({"userId": user_id, "avatar": ""}),
        )
        .await;
    assert_eq!(body["user"]["avatar"], json!(""));
}

#[tokio::test]
async fn test_profile_update_missing_user_is_404() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_json(
            "/api/profile/update",
            &json!({"userId": 999, "name": "Nobody"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("User not found"));
}

#[tokio::test]
async fn test_wishlist_toggle_is_an_involution() {
    let server = TestServer::spawn().await;
    let (_, body) = server
        .post_json(
            "/api/signup",
            &json!({"name": "Ann", "email": "ann@x.com", "password": "pw"}),
        )
        .await;
    let user_id = body["user"]["id"].clone();

    let (status, body) = server
        .post_json(
            "/api/wishlist/toggle",
            &json!({"userId": user_id, "productId": 3}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wishlist"], json!([3]));

    let (_, body) = server
        .post_json(
            "/api/wishlist/toggle",
            &json!({"userId": user_id, "productId": 3}),
        )
        .await;
    assert_eq!(body["wishlist"], json!([]));
}

#[tokio::test]
async fn test_delete_user_is_idempotent() {
    let server = TestServer::spawn().await;
    let (_, body) = server
        .post_json(
            "/api/signup",
            &json!({"name": "Ann", "email": "ann@x.com", "password": "pw"}),
        )
        .await;
    let user_id = body["user"]["id"].as_i64().expect("user id");

    let (status, body) = server
        .delete_json(&format!("/api/users/delete/{user_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    // Deleting the same id again is still a success.
    let (status, _) = server
        .delete_json(&format!("/api/users/delete/{user_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = server.get_json("/api/users").await;
    assert_eq!(body["users"], json!([]));
}
