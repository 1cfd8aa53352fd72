//! Generic JSON webhook (e.g. a spreadsheet script endpoint).
//!
//! The payload is posted as-is. The endpoint must answer 2xx with a JSON
//! object carrying `"ok": true`; anything else is a failure.

use smeta_config::{integrations::is_unset, WebhookConfig};
use smeta_protocol::SenderPayload;

use crate::dispatch::{SendReceipt, Sender};
use crate::error::SendError;
use crate::{check_status, http_client};

#[derive(Clone)]
pub struct WebhookSender {
    http: reqwest::blocking::Client,
    url: String,
}

impl WebhookSender {
    pub fn new(url: &str) -> Result<Self, SendError> {
        if is_unset(url) {
            return Err(SendError::NotConfigured("webhook url".into()));
        }
        Ok(Self {
            http: http_client()?,
            url: url.trim().to_string(),
        })
    }

    pub fn from_config(config: &WebhookConfig) -> Result<Self, SendError> {
        Self::new(&config.url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sender for WebhookSender {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn send(&self, payload: &SenderPayload) -> Result<SendReceipt, SendError> {
        let response = self.http.post(&self.url)
            .json(payload)
            .send()
            .map_err(|e| SendError::Network(e.to_string()))?;
        let response = check_status(response)?;

        let json: serde_json::Value = response.json().map_err(|e| SendError::Parse(e.to_string()))?;
        if json.get("ok").and_then(serde_json::Value::as_bool) != Some(true) {
            return Err(SendError::Rejected(json.to_string()));
        }

        Ok(SendReceipt { target: self.name(), reference: None })
    }
}
