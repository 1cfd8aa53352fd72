// JSON export of records and sender payloads

use std::path::Path;

use serde::Serialize;
use smeta_protocol::SenderPayload;

use smeta_engine::Record;

/// Pretty-printed record, metadata included.
pub fn record_json<M: Serialize>(record: &Record<M>) -> Result<String, String> {
    serde_json::to_string_pretty(record).map_err(|e| e.to_string())
}

pub fn export_record<M: Serialize>(record: &Record<M>, path: &Path) -> Result<(), String> {
    let json = record_json(record)?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// Write the exact body the webhook sender would post.
pub fn export_payload(payload: &SenderPayload, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(payload).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}
