//! Order lifecycle: placement, per-user listing, status updates, deletion.

use reqwest::StatusCode;
use serde_json::json;

use paper_cart_integration_tests::TestServer;

fn sample_order(user_id: serde_json::Value) -> serde_json::Value {
    json!({
        "userId": user_id,
        "userName": "Ann",
        "items": [{"productId": 3, "qty": 2}],
        "total": 50,
        "address": "12 Main St"
    })
}

#[tokio::test]
async fn test_place_order_starts_pending() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_json("/api/orders/place", &sample_order(json!(42)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["order"]["status"], json!("Pending"));
    assert!(body["order"].get("date").is_some());
    assert!(body["order"].get("time").is_some());
}

#[tokio::test]
async fn test_place_order_without_total_is_rejected_and_not_persisted() {
    let server = TestServer::spawn().await;

    let mut order = sample_order(json!(42));
    order.as_object_mut().expect("object").remove("total");

    let (status, body) = server.post_json("/api/orders/place", &order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid order data"));

    let (_, body) = server.get_json("/api/orders/all").await;
    assert_eq!(body["orders"], json!([]));
}

#[tokio::test]
async fn test_place_order_without_items_is_rejected() {
    let server = TestServer::spawn().await;

    let (status, _) = server
        .post_json("/api/orders/place", &json!({"userId": 42, "total": 50}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_orders_for_user_match_loosely() {
    let server = TestServer::spawn().await;

    // One order with a numeric user id, one with the string form.
    server
        .post_json("/api/orders/place", &sample_order(json!(42)))
        .await;
    server
        .post_json("/api/orders/place", &sample_order(json!("42")))
        .await;
    server
        .post_json("/api/orders/place", &sample_order(json!(7)))
        .await;

    let (status, body) = server.get_json("/api/orders/user/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"].as_array().expect("orders").len(), 2);

    let (_, body) = server.get_json("/api/orders/user/9").await;
    assert_eq!(body["orders"], json!([]));
}

#[tokio::test]
async fn test_update_status_overwrites_text() {
    let server = TestServer::spawn().await;
    let (_, body) = server
        .post_json("/api/orders/place", &sample_order(json!(42)))
        .await;
    let id = body["order"]["id"].as_i64().expect("order id");

    let (status, body) = server
        .post_json(
            &format!("/api/orders/status/{id}"),
            &json!({"status": "Out for delivery"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Status updated!"));

    let (_, body) = server.get_json("/api/orders/all").await;
    assert_eq!(body["orders"][0]["status"], json!("Out for delivery"));
}

#[tokio::test]
async fn test_update_status_unknown_order_is_404() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post_json("/api/orders/status/999", &json!({"status": "Shipped"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Order not found"));
}

#[tokio::test]
async fn test_delete_order_is_idempotent() {
    let server = TestServer::spawn().await;
    let (_, body) = server
        .post_json("/api/orders/place", &sample_order(json!(42)))
        .await;
    let id = body["order"]["id"].as_i64().expect("order id");

    let (status, _) = server
        .delete_json(&format!("/api/orders/delete/{id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server
        .delete_json(&format!("/api/orders/delete/{id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = server.get_json("/api/orders/all").await;
    assert_eq!(body["orders"], json!([]));
}
