//! Route definitions for the FoodFest API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handler::{
    clear_orders, create_menu_item, delete_menu_item, delete_order, get_menu, list_orders,
    submit_order, update_menu_item,
};
use crate::store::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/orders` - Records a submitted order
/// - `GET /api/orders` - Lists all recorded orders
/// - `DELETE /api/orders` - Clears the order sheet
/// - `DELETE /api/orders/{orderId}` - Deletes one order by id
/// - `GET /api/menu` - Returns stall meta and the item catalog
/// - `POST /api/menu` - Adds a menu item
/// - `PUT /api/menu/{key}` - Partially updates a menu item
/// - `DELETE /api/menu/{key}` - Removes a menu item
///
/// Static asset serving is layered on in `main`, outside the API router.
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/orders",
            get(list_orders).post(submit_order).delete(clear_orders),
        )
        .route("/orders/{order_id}", delete(delete_order))
        .route("/menu", get(get_menu).post(create_menu_item))
        .route("/menu/{key}", put(update_menu_item).delete(delete_menu_item));

    Router::new().nest("/api", api_routes).with_state(state)
}
