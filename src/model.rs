//! Data models for the FoodFest order and menu API
//!
//! This module defines all the data structures used throughout the application,
//! including request/response payloads and the records stored in the two
//! CSV-backed sheets. All wire-facing names are camelCase.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of an order as submitted by the client
///
/// Line items are not persisted structurally: at submission time they are
/// flattened into a single human-readable summary string such as
/// `"Tea x2 @ Rs20 (Rs40)"`. Missing fields fall back to an empty name,
/// zero quantity and zero price.
#[derive(Deserialize, Debug, Clone)]
pub struct LineItem {
    /// Display name of the ordered item
    pub name: Option<String>,

    /// Quantity ordered; a missing or zero quantity renders as `x0` and
    /// disables the per-unit price calculation
    pub qty: Option<u32>,

    /// Total price for this line (not per unit)
    pub price: Option<f64>,
}

/// Request payload for submitting a new order
///
/// # Example
/// ```json
/// {
///   "name": "Asha",
///   "items": [{"name": "Tea", "qty": 2, "price": 40}],
///   "totalPrice": 40
/// }
/// ```
///
/// Every field except `items` is optional; `items` must be present and
/// non-empty, which the handler validates before touching the store.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Customer name; defaults to "Guest" when absent
    pub name: Option<String>,

    /// Ordered line items; must be non-empty
    pub items: Option<Vec<LineItem>>,

    /// Client-computed total price for the whole order
    pub total_price: Option<f64>,

    /// ISO 8601 submission timestamp; server `now()` when absent
    pub ordered_at: Option<String>,

    /// Explicit client IP override; when absent the IP is derived from the
    /// `x-forwarded-for` header or the peer socket address
    pub client_ip: Option<String>,
}

/// Response returned after an order has been recorded
///
/// # Example
/// ```json
/// {
///   "ok": true,
///   "orderId": 1,
///   "orderedAt": "2026-08-23T10:15:00.000Z",
///   "ip": "203.0.113.9"
/// }
/// ```
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub ok: bool,

    /// Server-assigned order number, strictly increasing per store
    pub order_id: u64,

    /// The ISO 8601 timestamp that was persisted for this order
    pub ordered_at: String,

    /// The IP recorded alongside the order
    pub ip: String,
}

/// Full contents of the order sheet as returned by `GET /api/orders`
///
/// `headers` is always the canonical column list, even when the sheet file
/// does not exist yet; `rows` preserves file order, which equals insertion
/// order since the sheet is append-only apart from deletions.
#[derive(Serialize, Debug, Clone)]
pub struct OrderLog {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A catalog entry in the menu sheet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique identifier within the catalog; always non-empty after trimming
    pub key: String,

    /// Optional emoji shown next to the item
    #[serde(default)]
    pub emoji: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Upper price bound; coerced to a number on input, 0 when invalid
    #[serde(default)]
    pub max_price: f64,
}

/// Stall-level metadata stored once per menu sheet
///
/// This is a single record, not a collection: the first row of the menu
/// sheet always holds exactly `[stallName, festName]`, independent of how
/// many items follow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    pub stall_name: String,
    pub fest_name: String,
}

/// Menu sheet contents as returned by `GET /api/menu`
#[derive(Serialize, Debug, Clone)]
pub struct MenuSheet {
    pub meta: MenuMeta,
    pub items: Vec<MenuItem>,
}

/// Request payload for creating a menu item
///
/// `maxPrice` is accepted as any JSON value and coerced to a number;
/// non-numeric input becomes 0 rather than failing the request.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    /// Required; rejected when missing or blank after trimming
    pub key: Option<String>,
    pub emoji: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_price: Option<Value>,
}

/// Partial update for an existing menu item
///
/// Each field carries its own presence flag: an absent field preserves the
/// stored value, a present field replaces it. `maxPrice` is re-coerced to a
/// number when present, defaulting to 0 for non-numeric input.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub emoji: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_price: Option<Value>,
}
