use serde::{Deserialize, Serialize};

/// Headers of the fixed columns, in display order. User-added columns follow
/// the total; the action column is never part of the data.
pub const FIXED_HEADERS: [&str; 6] = ["#", "Статья", "Ед", "Кол-во", "Цена за ед.", "Итого"];

/// A user-added free-text column, applied uniformly to every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
}

impl ColumnDef {
    /// Returns None for an empty or whitespace-only name (a cancelled prompt).
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self { name: name.to_string() })
    }
}
