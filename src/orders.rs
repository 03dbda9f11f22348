//! Order sheet: an append-only log of submitted orders
//!
//! Columns are strictly positional: `[Order ID, Name, Items, Total,
//! Date Time, IP]`. Every mutation re-reads the persisted sheet, applies the
//! change in memory and rewrites the file in full.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};

use crate::error::AppError;
use crate::model::{LineItem, OrderLog, OrderReceipt, OrderRequest};
use crate::store::{is_populated, read_sheet, write_sheet};

/// Canonical column order of the order sheet
pub const ORDER_HEADERS: [&str; 6] = ["Order ID", "Name", "Items", "Total", "Date Time", "IP"];

/// Handle to the order sheet file
///
/// The path is explicit so tests can run against isolated temporary files.
/// The file itself is created lazily on the first write.
#[derive(Clone)]
pub struct OrderStore {
    path: PathBuf,
}

impl OrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records a new order and returns its receipt
    ///
    /// The next order id is one more than the maximum id found across the
    /// existing rows, starting at 1 for an empty or absent sheet. Ids are
    /// therefore strictly increasing but not necessarily contiguous after
    /// deletions.
    ///
    /// `fallback_ip` is used when the payload carries no explicit
    /// `clientIp`; the handler derives it from the request context.
    pub fn append(
        &self,
        payload: &OrderRequest,
        fallback_ip: &str,
    ) -> Result<OrderReceipt, AppError> {
        let existing = read_sheet(&self.path)?.unwrap_or_default();
        let data_rows: Vec<Vec<String>> = existing
            .iter()
            .skip(1)
            .map(|record| record.iter().map(str::to_string).collect())
            .collect();

        let order_id = data_rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .filter_map(|row| row.first()?.trim().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let ordered_at = payload
            .ordered_at
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        let ip = payload
            .client_ip
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback_ip.to_string());

        let name = payload
            .name
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "Guest".to_string());

        let items = payload.items.as_deref().unwrap_or_default();
        let summary = items
            .iter()
            .map(line_summary)
            .collect::<Vec<_>>()
            .join("; ");

        let total = payload.total_price.unwrap_or(0.0);

        let new_row = vec![
            order_id.to_string(),
            name,
            summary,
            format_number(total),
            format_display_time(&ordered_at),
            ip.clone(),
        ];

        let header: Vec<String> = ORDER_HEADERS.iter().map(|h| h.to_string()).collect();
        let rows = std::iter::once(header)
            .chain(data_rows)
            .chain(std::iter::once(new_row));
        write_sheet(&self.path, rows)?;

        tracing::info!(order_id, total, "order recorded");

        Ok(OrderReceipt {
            ok: true,
            order_id,
            ordered_at,
            ip,
        })
    }

    /// Returns the canonical headers plus all non-empty data rows in file
    /// order; an absent sheet yields an empty row set
    pub fn list(&self) -> Result<OrderLog, AppError> {
        let headers: Vec<String> = ORDER_HEADERS.iter().map(|h| h.to_string()).collect();

        let rows = match read_sheet(&self.path)? {
            Some(records) => records
                .iter()
                .skip(1)
                .filter(|record| is_populated(record))
                .map(|record| record.iter().map(str::to_string).collect())
                .collect(),
            None => Vec::new(),
        };

        Ok(OrderLog { headers, rows })
    }

    /// Removes every row whose order id (compared as a string) matches
    ///
    /// Fails with `NotFound` when no row matched; otherwise the remaining
    /// rows are rewritten in their original order.
    pub fn delete_one(&self, order_id: &str) -> Result<(), AppError> {
        let existing = read_sheet(&self.path)?.unwrap_or_default();
        let data_rows: Vec<Vec<String>> = existing
            .iter()
            .skip(1)
            .map(|record| record.iter().map(str::to_string).collect())
            .collect();

        let kept: Vec<Vec<String>> = data_rows
            .iter()
            .filter(|row| row.first().map(|id| id.trim()) != Some(order_id))
            .cloned()
            .collect();

        if kept.len() == data_rows.len() {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        let header: Vec<String> = ORDER_HEADERS.iter().map(|h| h.to_string()).collect();
        write_sheet(&self.path, std::iter::once(header).chain(kept))?;

        tracing::info!(order_id, "order deleted");
        Ok(())
    }

    /// Rewrites the sheet down to its header row
    pub fn clear(&self) -> Result<(), AppError> {
        let header: Vec<String> = ORDER_HEADERS.iter().map(|h| h.to_string()).collect();
        write_sheet(&self.path, std::iter::once(header))?;

        tracing::info!("order sheet cleared");
        Ok(())
    }
}

/// Flattens one line item into its stored summary form,
/// e.g. `"Tea x2 @ Rs20 (Rs40)"`
///
/// The unit price is the rounded per-piece price when the quantity is
/// positive; otherwise the line price is shown as-is.
fn line_summary(item: &LineItem) -> String {
    let name = item.name.as_deref().unwrap_or("");
    let qty = item.qty.unwrap_or(0);
    let price = item.price.unwrap_or(0.0);
    let unit = if qty > 0 {
        (price / qty as f64).round()
    } else {
        price
    };

    format!(
        "{} x{} @ Rs{} (Rs{})",
        name,
        qty,
        format_number(unit),
        format_number(price)
    )
}

/// Renders the display timestamp as `DD-MM-YY, HH:MM` in local time
///
/// An unparsable input falls back to the current local time.
fn format_display_time(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Local))
        .unwrap_or_else(|_| Local::now())
        .format("%d-%m-%y, %H:%M")
        .to_string()
}

/// Whole numbers print without a trailing `.0`
fn format_number(value: f64) -> String {
    format!("{}", value)
}
