use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::email::application::ports::outgoing::{EmailSendError, EmailSender, OutgoingEmail};

/// Keeps delivered emails in memory so tests can inspect them.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outbox(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailSendError> {
        self.outbox.lock().unwrap().push(email);
        Ok(())
    }
}
