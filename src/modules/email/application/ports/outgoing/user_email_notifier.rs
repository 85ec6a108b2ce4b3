#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Account emails sent to users. Implementations own the templates.
#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_welcome(
        &self,
        to: &str,
        full_name: &str,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_code(
        &self,
        to: &str,
        full_name: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<(), UserEmailNotificationError>;
}
