use crate::config::JwtSettings;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,  // Expiration in seconds
    pub refresh_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Values were range-checked when the settings were loaded.
    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self {
            secret_key: settings.secret.clone(),
            issuer: settings.issuer.clone(),
            access_token_expiry: settings.access_token_expiry,
            refresh_token_expiry: settings.refresh_token_expiry,
        }
    }
}
