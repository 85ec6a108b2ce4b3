pub mod settings;

pub use settings::{
    AppSettings, CodeAlphabet, CodeGenerationSettings, DatabaseSettings, EmailMode,
    EmailSettings, FileStorageSettings, HostSettings, JwtSettings, ScheduleSettings,
    SettingsError,
};
