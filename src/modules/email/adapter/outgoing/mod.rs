pub mod log_sender;
#[cfg(test)]
pub mod recording_sender;
pub mod smtp_sender;

use std::sync::Arc;

use crate::config::{EmailMode, EmailSettings};
use crate::email::application::ports::outgoing::EmailSender;

pub use log_sender::LogEmailSender;
pub use smtp_sender::SmtpEmailSender;

/// Picks the transport configured by `email.mode`.
pub fn build_email_sender(
    settings: &EmailSettings,
) -> Result<Arc<dyn EmailSender + Send + Sync>, String> {
    match settings.mode {
        EmailMode::Smtp => {
            let server = settings
                .smtp_server
                .as_deref()
                .ok_or_else(|| "email.smtp_server is not set".to_string())?;
            let sender = SmtpEmailSender::new(
                server,
                settings.username.as_deref().unwrap_or_default(),
                settings.password.as_deref().unwrap_or_default(),
                &settings.from,
            )?;
            Ok(Arc::new(sender))
        }
        EmailMode::Local => Ok(Arc::new(SmtpEmailSender::new_local(
            &settings.local_host,
            settings.local_port,
            &settings.from,
        ))),
        EmailMode::Disabled => Ok(Arc::new(LogEmailSender)),
    }
}
