//! Card tracker sender (Trello-compatible REST API).
//!
//! One send is three kinds of request:
//! 1. create a card in the configured list
//! 2. attach a checklist to it
//! 3. add one checklist item per line item
//!
//! Credentials travel as `key`/`token` query parameters.

use smeta_config::CardsConfig;
use smeta_protocol::{PayloadRow, SenderPayload};

use crate::dispatch::{SendReceipt, Sender};
use crate::error::SendError;
use crate::{check_status, http_client};

pub const CHECKLIST_NAME: &str = "Смета / Позиции";
pub const MAX_CHECK_ITEM_CHARS: usize = 180;
const CARD_PREFIX: &str = "[Grace]";
const UNTITLED_CARD: &str = "Без названия";

#[derive(Clone)]
pub struct CardTrackerSender {
    http: reqwest::blocking::Client,
    api_base: String,
    key: String,
    token: String,
    list_id: String,
}

impl CardTrackerSender {
    pub fn new(config: &CardsConfig) -> Result<Self, SendError> {
        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(SendError::NotConfigured(format!("cards {}", missing.join(", "))));
        }
        Ok(Self {
            http: http_client()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            token: config.token.clone(),
            list_id: config.list_id.clone(),
        })
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }

    /// Create the card. Returns its id.
    fn create_card(&self, payload: &SenderPayload) -> Result<String, SendError> {
        let url = format!("{}/1/cards", self.api_base);
        let name = card_name(payload);
        let desc = card_description(payload);
        let response = self.http.post(&url)
            .query(&self.auth())
            .form(&[
                ("idList", self.list_id.as_str()),
                ("name", name.as_str()),
                ("desc", desc.as_str()),
                ("pos", "top"),
            ])
            .send()
            .map_err(|e| SendError::Network(e.to_string()))?;
        read_id(check_status(response)?)
    }

    /// Attach the line-item checklist. Returns its id.
    fn add_checklist(&self, card_id: &str) -> Result<String, SendError> {
        let url = format!("{}/1/cards/{}/checklists", self.api_base, card_id);
        let response = self.http.post(&url)
            .query(&self.auth())
            .json(&serde_json::json!({ "name": CHECKLIST_NAME }))
            .send()
            .map_err(|e| SendError::Network(e.to_string()))?;
        read_id(check_status(response)?)
    }

    fn add_check_item(&self, checklist_id: &str, text: &str) -> Result<(), SendError> {
        let url = format!("{}/1/checklists/{}/checkItems", self.api_base, checklist_id);
        let response = self.http.post(&url)
            .query(&self.auth())
            .query(&[("name", text)])
            .send()
            .map_err(|e| SendError::Network(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }
}

impl Sender for CardTrackerSender {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn send(&self, payload: &SenderPayload) -> Result<SendReceipt, SendError> {
        let card_id = self.create_card(payload)?;
        log::debug!("Created card {}", card_id);

        let checklist_id = self.add_checklist(&card_id)?;
        for row in &payload.rows {
            self.add_check_item(&checklist_id, &check_item_text(row))?;
        }

        Ok(SendReceipt { target: self.name(), reference: Some(card_id) })
    }
}

/// `[Grace] <project>`.
pub fn card_name(payload: &SenderPayload) -> String {
    let project = payload.project.trim();
    let project = if project.is_empty() { UNTITLED_CARD } else { project };
    format!("{} {}", CARD_PREFIX, project)
}

/// Totals line, percent line, then the notes (or `-`).
pub fn card_description(payload: &SenderPayload) -> String {
    let notes = if payload.notes.trim().is_empty() { "-" } else { payload.notes.as_str() };
    [
        format!("Итог: {}", payload.grand_total),
        format!("Процент: {} → {}", payload.percent, payload.percent_amount),
        String::new(),
        "Заметки:".to_string(),
        notes.to_string(),
    ]
    .join("\n")
}

/// `name — qty × price = total`, cut to [`MAX_CHECK_ITEM_CHARS`] characters.
pub fn check_item_text(row: &PayloadRow) -> String {
    format!("{} — {} × {} = {}", row.name, row.qty, row.price, row.total)
        .chars()
        .take(MAX_CHECK_ITEM_CHARS)
        .collect()
}

fn read_id(response: reqwest::blocking::Response) -> Result<String, SendError> {
    let json: serde_json::Value = response.json().map_err(|e| SendError::Parse(e.to_string()))?;
    json["id"].as_str()
        .map(String::from)
        .ok_or_else(|| SendError::Parse("Missing id in response".into()))
}
