//! End-to-end tests for item CRUD over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, delete, get, send_multipart, MultipartBuilder};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_without_files_leaves_locators_absent(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new()
        .text("name", "Unicorn")
        .text("price", "29.99");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Unicorn");
    assert_eq!(json["data"]["price"], 29.99);
    assert!(json["data"]["image_path"].is_null());
    assert!(json["data"]["sound_file"].is_null());
    assert!(json["data"]["id"].is_i64());

    // No custom sound: the sound endpoint is a 404, not an error.
    let id = json["data"]["id"].as_i64().unwrap();
    let response = get(app, &format!("/api/items/{id}/sound")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_name_and_valid_price(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new().text("price", "9.99");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("name"));

    let form = MultipartBuilder::new()
        .text("name", "Kite")
        .text("price", "-5");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = MultipartBuilder::new()
        .text("name", "Kite")
        .text("price", "not-a-number");
    let response = send_multipart(app, Method::POST, "/api/items", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_newest_first(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    for (name, price) in [("First", "1.00"), ("Second", "2.00")] {
        let form = MultipartBuilder::new().text("name", name).text("price", price);
        let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, "/api/items").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Second");
    assert_eq!(data[1]["name"], "First");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_item_is_404_and_bad_id_is_400(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = get(app.clone(), "/api/items/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);

    let response = get(app, "/api/items/not-a-number").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid item ID");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn price_only_update_preserves_other_fields(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new()
        .text("name", "Robot")
        .text("price", "42.00");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let form = MultipartBuilder::new().text("price", "35.00");
    let response =
        send_multipart(app.clone(), Method::PUT, &format!("/api/items/{id}"), form).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Robot");
    assert_eq!(json["data"]["price"], 35.00);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_of_unknown_item_is_404(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new().text("price", "1.00");
    let response = send_multipart(app, Method::PUT, "/api/items/999", form).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_with_no_fields_is_rejected(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new()
        .text("name", "Ball")
        .text("price", "5.00");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = send_multipart(
        app,
        Method::PUT,
        &format!("/api/items/{id}"),
        MultipartBuilder::new(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_item_from_listing(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let form = MultipartBuilder::new()
        .text("name", "Gone Soon")
        .text("price", "3.50");
    let response = send_multipart(app.clone(), Method::POST, "/api/items", form).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let response = get(app.clone(), &format!("/api/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/items").await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_of_unknown_item_is_404(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = delete(app, "/api/items/12345").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn default_sound_missing_asset_is_404(pool: SqlitePool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = get(app, "/api/default-sound").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn default_sound_served_when_present(pool: SqlitePool) {
    let (app, uploads) = common::build_test_app(pool);
    std::fs::write(
        uploads.path().join("sounds/default-sound.mp3"),
        b"ID3 fake mp3",
    )
    .unwrap();

    let response = get(app, "/api/default-sound").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "audio/mpeg"
    );
    assert_eq!(common::body_bytes(response).await, b"ID3 fake mp3");
}
