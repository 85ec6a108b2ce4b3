use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::email::application::ports::outgoing::{
    EmailSender, OutgoingEmail, UserEmailNotificationError, UserEmailNotifier,
};

/// Renders account emails and hands them to an [`EmailSender`].
#[derive(Clone)]
pub struct EmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_name: String,
    public_url: Option<String>,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl EmailService {
    pub fn new(
        sender: Arc<dyn EmailSender + Send + Sync>,
        app_name: impl Into<String>,
        public_url: Option<String>,
    ) -> Self {
        Self {
            sender,
            app_name: app_name.into(),
            public_url,
        }
    }

    async fn deliver(&self, email: OutgoingEmail) -> Result<(), UserEmailNotificationError> {
        let to = email.to.clone();
        let subject = email.subject.clone();

        self.sender.send(email).await.map_err(|e| {
            error!(to = %to, subject = %subject, error = %e, "Failed to send email");
            UserEmailNotificationError::EmailSendingFailed(e.to_string())
        })?;

        debug!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }

    fn welcome_body(&self, full_name: &str) -> String {
        let link = match &self.public_url {
            Some(url) => format!(
                "<p>You can sign in at <a href=\"{url}\">{url}</a>.</p>",
                url = escape_html(url)
            ),
            None => String::new(),
        };

        format!(
            "<h2>Welcome to {app}</h2>\
             <p>Hello {name},</p>\
             <p>An administrator has created an account for you.</p>\
             {link}",
            app = escape_html(&self.app_name),
            name = escape_html(full_name),
        )
    }

    fn reset_code_body(&self, full_name: &str, code: &str, expires_in_minutes: i64) -> String {
        format!(
            "<h2>{app} password reset</h2>\
             <p>Hello {name},</p>\
             <p>Your password reset code is:</p>\
             <p style=\"font-size:24px;letter-spacing:4px\"><strong>{code}</strong></p>\
             <p>The code expires in {expires_in_minutes} minutes. \
             If you did not request a reset you can ignore this email.</p>",
            app = escape_html(&self.app_name),
            name = escape_html(full_name),
            code = escape_html(code),
        )
    }
}

#[async_trait]
impl UserEmailNotifier for EmailService {
    async fn send_welcome(
        &self,
        to: &str,
        full_name: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let subject = format!("Welcome to {}", self.app_name);
        self.deliver(OutgoingEmail::new(to, subject, self.welcome_body(full_name)))
            .await
    }

    async fn send_password_reset_code(
        &self,
        to: &str,
        full_name: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<(), UserEmailNotificationError> {
        let subject = format!("{} password reset code", self.app_name);
        let body = self.reset_code_body(full_name, code, expires_in_minutes);
        self.deliver(OutgoingEmail::new(to, subject, body)).await
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
