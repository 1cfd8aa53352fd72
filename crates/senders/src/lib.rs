//! Outbound senders.
//!
//! Blocking reqwest clients (no Tokio runtime required). Each sender takes
//! the frozen [`SenderPayload`](smeta_protocol::SenderPayload) and transmits
//! it verbatim; [`dispatch`] moves a send onto a background thread so the
//! caller can keep editing while it is in flight.

mod cards;
mod dispatch;
mod error;
mod webhook;

pub use cards::{card_description, card_name, check_item_text, CardTrackerSender, CHECKLIST_NAME, MAX_CHECK_ITEM_CHARS};
pub use dispatch::{dispatch, SendReceipt, Sender};
pub use error::{SendError, SendErrorKind};
pub use webhook::WebhookSender;

use std::time::Duration;

const USER_AGENT: &str = concat!("smeta/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn http_client() -> Result<reqwest::blocking::Client, SendError> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| SendError::Network(e.to_string()))
}

/// Fail on non-2xx, keeping the response body for the error message.
fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, SendError> {
    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().unwrap_or_default();
        return Err(SendError::Http(status, body));
    }
    Ok(response)
}
