use std::thread::{self, JoinHandle};

use smeta_protocol::SenderPayload;

use crate::error::SendError;

/// Acknowledgement of a completed send.
#[derive(Debug, Clone, PartialEq)]
pub struct SendReceipt {
    /// Which sender produced it (`"webhook"`, `"cards"`).
    pub target: &'static str,
    /// Remote identifier of what was created, when the remote returns one.
    pub reference: Option<String>,
}

/// An external collaborator that transmits a payload.
pub trait Sender {
    fn name(&self) -> &'static str;

    /// Transmit synchronously.
    fn send(&self, payload: &SenderPayload) -> Result<SendReceipt, SendError>;
}

/// Run a send on a background thread.
///
/// The payload is an owned snapshot, so the table it came from can keep
/// changing. There is no cancellation; the handle can be polled with
/// `is_finished` or joined.
pub fn dispatch<S>(sender: S, payload: SenderPayload) -> JoinHandle<Result<SendReceipt, SendError>>
where
    S: Sender + Send + 'static,
{
    thread::spawn(move || {
        let result = sender.send(&payload);
        match &result {
            Ok(receipt) => log::info!(
                "Sent '{}' via {} ({} rows)",
                payload.project,
                receipt.target,
                payload.rows.len()
            ),
            Err(e) => log::warn!("Send via {} failed: {}", sender.name(), e),
        }
        result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct Recording(mpsc::Sender<SenderPayload>);

    impl Sender for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn send(&self, payload: &SenderPayload) -> Result<SendReceipt, SendError> {
            self.0.send(payload.clone()).map_err(|e| SendError::Network(e.to_string()))?;
            Ok(SendReceipt { target: "recording", reference: None })
        }
    }

    struct Unconfigured;

    impl Sender for Unconfigured {
        fn name(&self) -> &'static str {
            "unconfigured"
        }

        fn send(&self, _payload: &SenderPayload) -> Result<SendReceipt, SendError> {
            Err(SendError::NotConfigured("nothing set".into()))
        }
    }

    fn payload(project: &str) -> SenderPayload {
        SenderPayload {
            project: project.into(),
            rows: vec![],
            notes: String::new(),
            percent: "0".into(),
            percent_amount: "0.00 ₸".into(),
            grand_total: "0.00 ₸".into(),
        }
    }

    #[test]
    fn test_dispatch_sends_snapshot() {
        let (tx, rx) = mpsc::channel();
        let mut live = payload("before");
        let handle = dispatch(Recording(tx), live.clone());
        live.project = "after".into();

        let receipt = handle.join().unwrap().unwrap();
        assert_eq!(receipt.target, "recording");
        assert_eq!(rx.recv().unwrap().project, "before");
    }

    #[test]
    fn test_dispatch_returns_error() {
        let err = dispatch(Unconfigured, payload("x")).join().unwrap().unwrap_err();
        assert!(matches!(err, SendError::NotConfigured(_)));
    }
}
