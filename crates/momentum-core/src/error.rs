use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("settings_version {found} is newer than this build supports ({supported})")]
    UnsupportedSettingsVersion { found: u32, supported: u32 },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
