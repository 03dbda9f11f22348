//! HTTP request handlers for the order and menu API
//!
//! Each handler validates the minimal input shape, delegates to a single
//! store operation, and maps the outcome to a status code: bad input → 400,
//! duplicate key → 409, missing row/item → 404, storage failure → 500.
//! No handler touches both stores.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts, Path, State},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::AppError;
use crate::model::{MenuItemPatch, NewMenuItem, OrderRequest};
use crate::store::AppState;

/// Records a submitted order
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Asha",
///   "items": [{"name": "Tea", "qty": 2, "price": 40}],
///   "totalPrice": 40
/// }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"ok":true,"orderId":1,"orderedAt":"...","ip":"..."}`
/// - **400 Bad Request** - items missing or empty
/// - **500 Internal Server Error** - sheet could not be written
pub async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    PeerAddr(peer): PeerAddr,
    Json(payload): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload
        .items
        .as_deref()
        .map_or(true, |items| items.is_empty())
    {
        return Err(AppError::Validation("No items provided".to_string()));
    }

    let fallback_ip = request_ip(&headers, peer);
    let receipt = state.orders.append(&payload, &fallback_ip)?;
    Ok(Json(receipt))
}

/// Returns the canonical headers and every recorded order row
pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.orders.list()?))
}

/// Deletes one order by its id
///
/// # Response
///
/// - **200 OK** - `{"ok":true,"deleted":"<id>"}`
/// - **400 Bad Request** - blank id
/// - **404 Not Found** - no row with this id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let order_id = order_id.trim().to_string();
    if order_id.is_empty() {
        return Err(AppError::Validation("Order ID is required".to_string()));
    }

    state.orders.delete_one(&order_id)?;
    Ok(Json(json!({ "ok": true, "deleted": order_id })))
}

/// Clears the order sheet down to its header row
pub async fn clear_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.orders.clear()?;
    Ok(Json(json!({ "ok": true, "cleared": true })))
}

/// Returns the stall meta and the full item catalog
///
/// Any store failure, including a menu sheet that has never been written,
/// is surfaced as a 500 with a generic message; the real cause is logged.
pub async fn get_menu(State(state): State<AppState>) -> Response {
    match state.menu.list() {
        Ok(sheet) => Json(sheet).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to load menu");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Menu is not available" })),
            )
                .into_response()
        }
    }
}

/// Adds a new menu item
///
/// # Response
///
/// - **201 Created** - `{"ok":true,"item":{...}}`
/// - **400 Bad Request** - missing or blank key
/// - **409 Conflict** - key already in the catalog
pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(payload): Json<NewMenuItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.menu.create(payload)?;
    Ok((StatusCode::CREATED, Json(json!({ "ok": true, "item": item }))))
}

/// Partially updates a menu item by key
///
/// Fields absent from the body keep their stored values.
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<impl IntoResponse, AppError> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(AppError::Validation("Menu key is required".to_string()));
    }

    let item = state.menu.update(&key, patch)?;
    Ok(Json(json!({ "ok": true, "item": item })))
}

/// Removes a menu item by key
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(AppError::Validation("Menu key is required".to_string()));
    }

    state.menu.delete(&key)?;
    Ok(Json(json!({ "ok": true, "deleted": key })))
}

/// Peer socket address, present only when the server was started with
/// connect info attached (tests drive the router directly and have none)
pub struct PeerAddr(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for PeerAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
        ))
    }
}

/// Resolves the request's client IP
///
/// Takes the first comma-separated entry of `x-forwarded-for` when present,
/// then the peer socket address, then the literal `"Unknown"`.
fn request_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
