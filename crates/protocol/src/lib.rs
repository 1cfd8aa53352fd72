//! Outbound sender payload, v1 frozen wire format
//!
//! This crate defines the single structured payload handed to the external
//! senders (the JSON webhook and the card tracker). Both transmit it
//! verbatim, so the field names and value types are a public contract.
//!
//! # Payload Version
//!
//! This is **payload v1**; the shape is frozen. Changes require:
//! 1. Version bump in PAYLOAD_VERSION
//! 2. New golden file in `tests/golden/`
//! 3. Coordinating with whatever consumes the webhook
//!
//! # Shape
//!
//! ```json
//! {
//!   "project": "Проект без названия",
//!   "rows": [{"index": 1, "name": "PVC", "unit": "м²", "qty": "2", "price": "100", "total": "200.00"}],
//!   "notes": "",
//!   "percent": "10",
//!   "percentAmount": "45.00 ₸",
//!   "grandTotal": "495.00 ₸"
//! }
//! ```
//!
//! Every value is a string except `index`. Row totals are bare display
//! amounts; the trailer amounts carry the currency marker.

use serde::{Deserialize, Serialize};

/// Current payload version. Increment for breaking changes.
pub const PAYLOAD_VERSION: u32 = 1;

/// The record handed to an outbound sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderPayload {
    pub project: String,
    pub rows: Vec<PayloadRow>,
    pub notes: String,
    pub percent: String,
    pub percent_amount: String,
    pub grand_total: String,
}

/// One line item as transmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadRow {
    /// 1-based position in the table.
    pub index: usize,
    pub name: String,
    pub unit: String,
    /// Quantity as entered (`"2"`, `"0.5"`).
    pub qty: String,
    /// Unit price as entered.
    pub price: String,
    /// Row total as a display amount without currency (`"200.00"`).
    pub total: String,
}

impl SenderPayload {
    /// Serialize to the compact JSON body sent over the wire.
    pub fn to_json(&self) -> String {
        // A struct of strings and integers cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a payload received from elsewhere (used by tests and replay tools).
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SenderPayload {
        SenderPayload {
            project: "Вывеска".into(),
            rows: vec![PayloadRow {
                index: 1,
                name: "PVC 5–10 мм".into(),
                unit: "м²".into(),
                qty: "2".into(),
                price: "100".into(),
                total: "200.00".into(),
            }],
            notes: "".into(),
            percent: "10".into(),
            percent_amount: "20.00 ₸".into(),
            grand_total: "220.00 ₸".into(),
        }
    }

    #[test]
    fn test_payload_uses_camel_case_keys() {
        let json: serde_json::Value = serde_json::to_value(sample()).unwrap();
        assert!(json.get("percentAmount").is_some());
        assert!(json.get("grandTotal").is_some());
        assert!(json.get("percent_amount").is_none());
    }

    #[test]
    fn test_payload_value_types() {
        let json: serde_json::Value = serde_json::to_value(sample()).unwrap();
        let row = &json["rows"][0];
        assert!(row["index"].is_u64());
        for key in ["name", "unit", "qty", "price", "total"] {
            assert!(row[key].is_string(), "rows[0].{key} must be a string");
        }
        for key in ["project", "notes", "percent", "percentAmount", "grandTotal"] {
            assert!(json[key].is_string(), "{key} must be a string");
        }
    }

    #[test]
    fn test_payload_json_roundtrip() {
        let payload = sample();
        let parsed = SenderPayload::from_json(&payload.to_json()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_from_json_rejects_missing_fields() {
        let err = SenderPayload::from_json(r#"{"project":"x"}"#).unwrap_err();
        assert!(err.contains("missing field"), "{err}");
    }
}
