//! Menu sheet: the item catalog plus stall metadata
//!
//! Layout: row 1 holds the positional meta pair `[stallName, festName]`,
//! row 2 holds the column headers `[Key, Emoji, Name, Description,
//! MaxPrice]`, and every following row is one catalog item. Item columns are
//! located by header name, case-insensitively after trimming, so an
//! externally reordered sheet still parses; the meta row is positional.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AppError;
use crate::model::{MenuItem, MenuItemPatch, MenuMeta, MenuSheet, NewMenuItem};
use crate::store::{read_sheet, write_sheet};

/// Canonical header row of the menu sheet
pub const MENU_HEADERS: [&str; 5] = ["Key", "Emoji", "Name", "Description", "MaxPrice"];

/// Handle to the menu sheet file
#[derive(Clone)]
pub struct MenuStore {
    path: PathBuf,
}

impl MenuStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the full sheet
    ///
    /// Fails with `NotFound` when the file does not exist; callers decide
    /// whether that is a user-visible failure (`GET /api/menu` surfaces it
    /// as a 500) or the starting point for a lazy first write.
    pub fn list(&self) -> Result<MenuSheet, AppError> {
        let records = read_sheet(&self.path)?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?;

        let meta = records
            .first()
            .map(|row| MenuMeta {
                stall_name: row.get(0).unwrap_or_default().to_string(),
                fest_name: row.get(1).unwrap_or_default().to_string(),
            })
            .unwrap_or_default();

        // Column positions are resolved by header name so a reordered
        // sheet still reads correctly
        let find_column = |wanted: &str| {
            records.get(1).and_then(|headers| {
                headers
                    .iter()
                    .position(|cell| cell.trim().eq_ignore_ascii_case(wanted))
            })
        };
        let key_col = find_column("key");
        let emoji_col = find_column("emoji");
        let name_col = find_column("name");
        let description_col = find_column("description");
        let max_price_col = find_column("maxprice");

        let cell = |row: &csv::StringRecord, col: Option<usize>| {
            col.and_then(|idx| row.get(idx)).unwrap_or("").to_string()
        };

        let mut items = Vec::new();
        for row in records.iter().skip(2) {
            let key = cell(row, key_col).trim().to_string();
            if key.is_empty() {
                continue;
            }
            items.push(MenuItem {
                key,
                emoji: cell(row, emoji_col),
                name: cell(row, name_col),
                description: cell(row, description_col),
                max_price: cell(row, max_price_col).trim().parse().unwrap_or(0.0),
            });
        }

        Ok(MenuSheet { meta, items })
    }

    /// Rewrites the whole sheet: meta row, header row, then the items
    ///
    /// The meta row is always written first, exactly once, even when the
    /// item collection is empty.
    pub fn write(&self, meta: &MenuMeta, items: &[MenuItem]) -> Result<(), AppError> {
        let mut rows = Vec::with_capacity(items.len() + 2);
        rows.push(vec![meta.stall_name.clone(), meta.fest_name.clone()]);
        rows.push(MENU_HEADERS.iter().map(|h| h.to_string()).collect());
        for item in items {
            rows.push(vec![
                item.key.clone(),
                item.emoji.clone(),
                item.name.clone(),
                item.description.clone(),
                format!("{}", item.max_price),
            ]);
        }
        write_sheet(&self.path, rows)
    }

    /// Adds a new catalog item
    ///
    /// Requires a non-blank key and rejects duplicates without overwriting.
    /// An absent sheet is created on the spot with empty meta.
    pub fn create(&self, input: NewMenuItem) -> Result<MenuItem, AppError> {
        let key = input
            .key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Validation("Menu key is required".to_string()))?
            .to_string();

        let MenuSheet { meta, mut items } = self.list_or_default()?;

        if items.iter().any(|item| item.key == key) {
            return Err(AppError::Conflict(
                "A menu item with this key already exists".to_string(),
            ));
        }

        let item = MenuItem {
            key,
            emoji: input.emoji.unwrap_or_default(),
            name: input.name.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            max_price: coerce_max_price(input.max_price.as_ref()),
        };
        items.push(item.clone());
        self.write(&meta, &items)?;

        tracing::info!(key = %item.key, "menu item created");
        Ok(item)
    }

    /// Applies a partial update to the item with the given key
    ///
    /// Only fields present in the patch replace stored values; the item
    /// keeps its position in the sheet.
    pub fn update(&self, key: &str, patch: MenuItemPatch) -> Result<MenuItem, AppError> {
        let MenuSheet { meta, mut items } = self.list_or_default()?;

        let item = items
            .iter_mut()
            .find(|item| item.key == key)
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

        if let Some(emoji) = patch.emoji {
            item.emoji = emoji;
        }
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(max_price) = patch.max_price {
            item.max_price = coerce_max_price(Some(&max_price));
        }
        let updated = item.clone();

        self.write(&meta, &items)?;

        tracing::info!(key = %updated.key, "menu item updated");
        Ok(updated)
    }

    /// Removes the item with the given key
    pub fn delete(&self, key: &str) -> Result<(), AppError> {
        let MenuSheet { meta, items } = self.list_or_default()?;

        let kept: Vec<MenuItem> = items.iter().filter(|item| item.key != key).cloned().collect();
        if kept.len() == items.len() {
            return Err(AppError::NotFound("Menu item not found".to_string()));
        }

        self.write(&meta, &kept)?;

        tracing::info!(key, "menu item deleted");
        Ok(())
    }

    /// Like `list`, but an absent sheet reads as empty meta and no items
    /// so that the first write can create it lazily
    fn list_or_default(&self) -> Result<MenuSheet, AppError> {
        match self.list() {
            Ok(sheet) => Ok(sheet),
            Err(AppError::NotFound(_)) => Ok(MenuSheet {
                meta: MenuMeta::default(),
                items: Vec::new(),
            }),
            Err(err) => Err(err),
        }
    }
}

/// Coerces a loosely-typed `maxPrice` input to a number
///
/// Numbers pass through, numeric strings are parsed, everything else
/// (including absence) becomes 0.
fn coerce_max_price(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
