//! Golden schema tests for the sender payload.
//!
//! The golden file is the public contract consumed by the webhook receiver.
//! If a field is added, removed, or renamed, these tests fail, forcing an
//! explicit PAYLOAD_VERSION bump.

use smeta_protocol::{PayloadRow, SenderPayload, PAYLOAD_VERSION};

fn golden() -> serde_json::Value {
    let path = "tests/golden/payload-v1.json";
    serde_json::from_str(
        &std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Cannot read {}: {}", path, e)),
    )
    .unwrap_or_else(|e| panic!("Cannot parse {}: {}", path, e))
}

fn scenario_payload() -> SenderPayload {
    SenderPayload {
        project: "Проект без названия".into(),
        rows: vec![
            PayloadRow {
                index: 1,
                name: "PVC 5–10 мм".into(),
                unit: "м²".into(),
                qty: "2".into(),
                price: "100".into(),
                total: "200.00".into(),
            },
            PayloadRow {
                index: 2,
                name: "Крепёж / рама".into(),
                unit: "комплект".into(),
                qty: "1".into(),
                price: "250".into(),
                total: "250.00".into(),
            },
        ],
        notes: String::new(),
        percent: "10".into(),
        percent_amount: "45.00 ₸".into(),
        grand_total: "495.00 ₸".into(),
    }
}

#[test]
fn test_golden_keys_match_exactly() {
    let golden = golden();
    let serialized = serde_json::to_value(scenario_payload()).unwrap();

    let golden_keys: Vec<_> = golden.as_object().unwrap().keys().collect();
    let serial_keys: Vec<_> = serialized.as_object().unwrap().keys().collect();
    let mut a = golden_keys.clone();
    let mut b = serial_keys.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b, "top-level keys drifted from payload v{}", PAYLOAD_VERSION);

    let golden_row: Vec<_> = golden["rows"][0].as_object().unwrap().keys().collect();
    let serial_row: Vec<_> = serialized["rows"][0].as_object().unwrap().keys().collect();
    let mut a = golden_row.clone();
    let mut b = serial_row.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b, "row keys drifted from payload v{}", PAYLOAD_VERSION);
}

#[test]
fn test_golden_parses_into_payload() {
    let parsed: SenderPayload = serde_json::from_value(golden()).unwrap();
    assert_eq!(parsed, scenario_payload());
}
