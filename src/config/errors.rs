use thiserror::Error;

/// Errors raised while resolving startup configuration
///
/// All variants are startup-time hard failures: the process reports the
/// problem and exits rather than limping along with a partial configuration.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Required secret '{secret_name}' is missing")]
    MissingSecret { secret_name: String },

    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting {
        setting_name: String,
        reason: String,
    },
}

impl ApplicationError {
    pub fn missing_secret(secret_name: &str) -> Self {
        Self::MissingSecret {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_setting(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }
}
