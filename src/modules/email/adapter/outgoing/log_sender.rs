use async_trait::async_trait;
use tracing::info;

use crate::email::application::ports::outgoing::{EmailSendError, EmailSender, OutgoingEmail};

/// Used when `email.mode` is `disabled`: emails are logged, never sent.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailSendError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body_len = email.html_body.len(),
            "Email delivery disabled; message not sent"
        );
        Ok(())
    }
}
