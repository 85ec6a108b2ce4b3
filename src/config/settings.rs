use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Purge retention bounds, roughly one day to one century.
pub const RETENTION_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=36_500;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings IO error ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings invalid: {0}")]
    Invalid(String),
}

/// Typed view of `appsettings.json`, bound once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub host: HostSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub email: EmailSettings,
    #[serde(default)]
    pub file_storage: FileStorageSettings,
    #[serde(default)]
    pub code_generation: CodeGenerationSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostSettings {
    pub address: String,
    pub port: u16,
    /// Base URL used in outgoing emails, e.g. `https://admin.example.com`
    #[serde(default)]
    pub public_url: Option<String>,
}

impl HostSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Seconds
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry: i64,
    /// Seconds
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailMode {
    Smtp,
    Local,
    #[default]
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub mode: EmailMode,
    #[serde(default = "default_email_from")]
    pub from: String,
    #[serde(default)]
    pub smtp_server: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_local_host")]
    pub local_host: String,
    #[serde(default = "default_local_port")]
    pub local_port: u16,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            mode: EmailMode::Disabled,
            from: default_email_from(),
            smtp_server: None,
            username: None,
            password: None,
            local_host: default_local_host(),
            local_port: default_local_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileStorageSettings {
    #[serde(default = "default_root_path")]
    pub root_path: String,
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for FileStorageSettings {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            public_base_url: None,
            max_file_size_bytes: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeAlphabet {
    #[default]
    Numeric,
    Alphanumeric,
}

/// One-time codes sent by email (password reset).
#[derive(Debug, Clone, Deserialize)]
pub struct CodeGenerationSettings {
    #[serde(default = "default_code_length")]
    pub length: usize,
    #[serde(default)]
    pub alphabet: CodeAlphabet,
    #[serde(default = "default_code_expiry")]
    pub expiry_seconds: i64,
}

impl Default for CodeGenerationSettings {
    fn default() -> Self {
        Self {
            length: default_code_length(),
            alphabet: CodeAlphabet::Numeric,
            expiry_seconds: default_code_expiry(),
        }
    }
}

/// Cron expressions use the six-field form with seconds first.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_purge_sessions_cron")]
    pub purge_sessions_cron: String,
    #[serde(default = "default_session_retention")]
    pub session_retention_days: i64,
    #[serde(default = "default_purge_users_cron")]
    pub purge_users_cron: String,
    #[serde(default = "default_user_retention")]
    pub user_retention_days: i64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            purge_sessions_cron: default_purge_sessions_cron(),
            session_retention_days: default_session_retention(),
            purge_users_cron: default_purge_users_cron(),
            user_retention_days: default_user_retention(),
        }
    }
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    5
}
fn default_idle_timeout() -> u64 {
    300
}
fn default_issuer() -> String {
    "admin_backend".to_string()
}
fn default_access_expiry() -> i64 {
    1800
}
fn default_refresh_expiry() -> i64 {
    604_800
}
fn default_email_from() -> String {
    "no-reply@localhost".to_string()
}
fn default_local_host() -> String {
    "localhost".to_string()
}
fn default_local_port() -> u16 {
    1025
}
fn default_root_path() -> String {
    "./uploads".to_string()
}
fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}
fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp", "pdf"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_code_length() -> usize {
    6
}
fn default_code_expiry() -> i64 {
    900
}
fn default_true() -> bool {
    true
}
fn default_purge_sessions_cron() -> String {
    "0 0 3 * * *".to_string()
}
fn default_session_retention() -> i64 {
    30
}
fn default_purge_users_cron() -> String {
    "0 30 3 * * *".to_string()
}
fn default_user_retention() -> i64 {
    90
}

impl AppSettings {
    /// Reads `appsettings.json` (or `$APP_SETTINGS`), layers the
    /// `appsettings.{RUST_ENV}.json` overlay on top when present, then applies
    /// environment overrides. Expects `.env` files to be loaded already.
    pub fn load() -> Result<Self, SettingsError> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let base_path = PathBuf::from(
            env::var("APP_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string()),
        );

        let mut merged = read_json(&base_path)?;

        let overlay_path = overlay_path_for(&base_path, &env_name);
        if overlay_path.exists() {
            let overlay = read_json(&overlay_path)?;
            merge_json(&mut merged, overlay);
        }

        let mut settings: AppSettings = serde_json::from_value(merged)?;
        settings.apply_overrides(|key| env::var(key).ok())?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        let settings: AppSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Secrets and deployment-specific values may come from the environment
    /// instead of the JSON file.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.host.address = host;
        }
        if let Some(port) = lookup("PORT") {
            self.host.port = port
                .parse()
                .map_err(|_| SettingsError::Invalid(format!("PORT is not a valid port: {port}")))?;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(password) = lookup("SMTP_PASSWORD") {
            self.email.password = Some(password);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        // HS256 needs at least 32 bytes of key material
        if self.jwt.secret.len() < 32 {
            return Err(SettingsError::Invalid(
                "jwt.secret must be at least 32 characters long".into(),
            ));
        }

        if self.jwt.access_token_expiry <= 0 || self.jwt.access_token_expiry > 86_400 {
            return Err(SettingsError::Invalid(
                "jwt.access_token_expiry must be between 1 and 86400 seconds".into(),
            ));
        }

        if self.jwt.refresh_token_expiry <= self.jwt.access_token_expiry {
            return Err(SettingsError::Invalid(
                "jwt.refresh_token_expiry must be greater than jwt.access_token_expiry".into(),
            ));
        }

        if !(4..=12).contains(&self.code_generation.length) {
            return Err(SettingsError::Invalid(
                "code_generation.length must be between 4 and 12".into(),
            ));
        }

        if self.code_generation.expiry_seconds <= 0 {
            return Err(SettingsError::Invalid(
                "code_generation.expiry_seconds must be positive".into(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(SettingsError::Invalid(
                "database.min_connections cannot exceed database.max_connections".into(),
            ));
        }

        if self.email.mode == EmailMode::Smtp && self.email.smtp_server.is_none() {
            return Err(SettingsError::Invalid(
                "email.smtp_server is required when email.mode is smtp".into(),
            ));
        }

        for (field, days) in [
            ("schedule.session_retention_days", self.schedule.session_retention_days),
            ("schedule.user_retention_days", self.schedule.user_retention_days),
        ] {
            if !RETENTION_DAYS_RANGE.contains(&days) {
                return Err(SettingsError::Invalid(format!(
                    "{field} must be between {} and {}",
                    RETENTION_DAYS_RANGE.start(),
                    RETENTION_DAYS_RANGE.end()
                )));
            }
        }

        for (field, expr) in [
            ("schedule.purge_sessions_cron", &self.schedule.purge_sessions_cron),
            ("schedule.purge_users_cron", &self.schedule.purge_users_cron),
        ] {
            cron::Schedule::from_str(expr)
                .map_err(|e| SettingsError::Invalid(format!("{field} is not valid: {e}")))?;
        }

        Ok(())
    }
}

fn read_json(path: &Path) -> Result<Value, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

/// `config/appsettings.json` + `production` → `config/appsettings.production.json`
fn overlay_path_for(base: &Path, env_name: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("appsettings");
    base.with_file_name(format!("{stem}.{env_name}.json"))
}

/// Deep-merges `overlay` into `base`. Objects merge key by key; any other
/// overlay value replaces the base value.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
