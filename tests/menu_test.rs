//! Integration tests for the menu endpoints and the menu sheet format
//!
//! Covers the CRUD surface over `/api/menu`, the meta-row contract, the
//! name-based column lookup and the store-level write/list round trip.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use foodfest::menu::MenuStore;
use foodfest::model::{MenuItem, MenuMeta};
use foodfest::orders::OrderStore;
use foodfest::route::create_app;
use foodfest::store::AppState;

/// Helper function to create a test application with temporary sheet files
fn setup_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let state = AppState {
        orders: OrderStore::new(temp_dir.path().join("orders-log.csv")),
        menu: MenuStore::new(temp_dir.path().join("menu.csv")),
    };

    (create_app(state), temp_dir)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

/// Helper to POST a menu item payload
async fn create_item(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/menu")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response_json(response.into_body()).await;
    (status, body)
}

/// Helper to fetch the menu sheet
async fn get_menu(app: &Router) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/menu")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response_json(response.into_body()).await;
    (status, body)
}

#[tokio::test]
async fn test_get_menu_missing_file() {
    let (app, _temp_dir) = setup_test_app();

    // No menu sheet has ever been written; this is a server-side failure,
    // not an empty catalog
    let (status, body) = get_menu(&app).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Menu is not available");
}

#[tokio::test]
async fn test_create_menu_item_success() {
    let (app, _temp_dir) = setup_test_app();

    let payload = json!({
        "key": "tea",
        "emoji": "🍵",
        "name": "Masala Tea",
        "description": "Hot and spicy",
        "maxPrice": 40
    });

    let (status, body) = create_item(&app, &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    assert_eq!(body["item"]["key"], "tea");
    assert_eq!(body["item"]["maxPrice"], 40.0);

    // The lazily created sheet carries empty meta and the new item
    let (status, menu) = get_menu(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["meta"]["stallName"], "");
    assert_eq!(menu["meta"]["festName"], "");
    let items = menu["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Masala Tea");
}

#[tokio::test]
async fn test_create_menu_item_missing_key() {
    let (app, _temp_dir) = setup_test_app();

    let (status, body) = create_item(&app, &json!({ "name": "No Key" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Menu key is required");

    // A key of pure whitespace is treated as missing
    let (status, _) = create_item(&app, &json!({ "key": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_menu_item_duplicate_key() {
    let (app, _temp_dir) = setup_test_app();

    let payload = json!({ "key": "tea", "name": "Original" });
    let (status, _) = create_item(&app, &payload).await;
    assert_eq!(status, StatusCode::CREATED);

    let clash = json!({ "key": "tea", "name": "Impostor" });
    let (status, body) = create_item(&app, &clash).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A menu item with this key already exists");

    // The original item is untouched
    let (_, menu) = get_menu(&app).await;
    let items = menu["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Original");
}

#[tokio::test]
async fn test_max_price_coercion() {
    let (app, _temp_dir) = setup_test_app();

    // A numeric string parses, garbage and absence both become 0
    let (_, body) = create_item(&app, &json!({ "key": "a", "maxPrice": "75.5" })).await;
    assert_eq!(body["item"]["maxPrice"], 75.5);

    let (_, body) = create_item(&app, &json!({ "key": "b", "maxPrice": "cheap" })).await;
    assert_eq!(body["item"]["maxPrice"], 0.0);

    let (_, body) = create_item(&app, &json!({ "key": "c" })).await;
    assert_eq!(body["item"]["maxPrice"], 0.0);
}

#[tokio::test]
async fn test_update_menu_item_partial() {
    let (app, _temp_dir) = setup_test_app();

    let payload = json!({
        "key": "tea",
        "emoji": "🍵",
        "name": "Masala Tea",
        "description": "Hot and spicy",
        "maxPrice": 40
    });
    create_item(&app, &payload).await;

    // Only maxPrice is supplied; every other field must survive
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/menu/tea")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "maxPrice": 50 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["item"]["maxPrice"], 50.0);
    assert_eq!(body["item"]["emoji"], "🍵");
    assert_eq!(body["item"]["name"], "Masala Tea");
    assert_eq!(body["item"]["description"], "Hot and spicy");

    // And the persisted sheet agrees
    let (_, menu) = get_menu(&app).await;
    assert_eq!(menu["items"][0]["maxPrice"], 50.0);
    assert_eq!(menu["items"][0]["description"], "Hot and spicy");
}

#[tokio::test]
async fn test_update_menu_item_not_found() {
    let (app, _temp_dir) = setup_test_app();

    create_item(&app, &json!({ "key": "tea", "name": "Masala Tea" })).await;
    let (_, before) = get_menu(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/menu/coffee")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "maxPrice": 50 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Menu item not found");

    // A failed update leaves the sheet byte-for-byte equivalent
    let (_, after) = get_menu(&app).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_delete_menu_item() {
    let (app, _temp_dir) = setup_test_app();

    create_item(&app, &json!({ "key": "tea", "name": "Masala Tea" })).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/menu/tea")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["deleted"], "tea");

    // The meta row outlives the last item
    let (status, menu) = get_menu(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["items"].as_array().unwrap().len(), 0);

    // Deleting again is a not-found, not a no-op
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/menu/tea")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Menu item not found");
}

#[tokio::test]
async fn test_menu_persists_across_restart() {
    let temp_dir = TempDir::new().unwrap();
    let orders_path = temp_dir.path().join("orders-log.csv");
    let menu_path = temp_dir.path().join("menu.csv");

    let app = create_app(AppState {
        orders: OrderStore::new(&orders_path),
        menu: MenuStore::new(&menu_path),
    });
    create_item(&app, &json!({ "key": "tea", "name": "Masala Tea" })).await;

    let app = create_app(AppState {
        orders: OrderStore::new(&orders_path),
        menu: MenuStore::new(&menu_path),
    });
    let (status, menu) = get_menu(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["items"][0]["key"], "tea");
}

#[test]
fn test_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = MenuStore::new(temp_dir.path().join("menu.csv"));

    let meta = MenuMeta {
        stall_name: "Chai Point".to_string(),
        fest_name: "Winter Fest".to_string(),
    };
    let items = vec![
        MenuItem {
            key: "tea".to_string(),
            emoji: "🍵".to_string(),
            name: "Masala Tea".to_string(),
            description: "Hot and spicy".to_string(),
            max_price: 40.0,
        },
        MenuItem {
            key: "vada".to_string(),
            emoji: String::new(),
            name: "Medu Vada".to_string(),
            description: String::new(),
            max_price: 25.5,
        },
    ];

    store.write(&meta, &items).unwrap();
    let sheet = store.list().unwrap();

    assert_eq!(sheet.meta, meta);
    assert_eq!(sheet.items, items);
}

#[test]
fn test_columns_resolved_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("menu.csv");

    // Reordered, oddly cased headers and a keyless row that must be skipped
    std::fs::write(
        &path,
        "Chai Point,Winter Fest\n\
         MAXPRICE, key ,Name,Emoji,Description\n\
         40,tea,Masala Tea,🍵,Hot and spicy\n\
         10,,Orphan,,no key here\n",
    )
    .unwrap();

    let sheet = MenuStore::new(&path).list().unwrap();

    assert_eq!(sheet.meta.stall_name, "Chai Point");
    assert_eq!(sheet.meta.fest_name, "Winter Fest");
    assert_eq!(sheet.items.len(), 1);
    assert_eq!(sheet.items[0].key, "tea");
    assert_eq!(sheet.items[0].name, "Masala Tea");
    assert_eq!(sheet.items[0].max_price, 40.0);
}
