// Export formats for estimate records

pub mod csv;
pub mod html;
pub mod json;

/// Byte-order mark prefixed to CSV exports so spreadsheet apps detect UTF-8.
pub const UTF8_BOM: &str = "\u{FEFF}";
