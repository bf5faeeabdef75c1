use std::fmt;
use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

const DEFAULT_API_BASE: &str = "https://api.resend.com";
const DEFAULT_FROM: &str = "Waitlist <onboarding@resend.dev>";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;

/// Settings for the confirmation email delivery channel
///
/// The API key is required: a process without delivery credentials fails at
/// boot rather than discovering the problem on the first registration.
pub struct MailerSettings {
    api_key: String,
    api_base: String,
    from_address: String,
    reply_to: Option<String>,
    send_timeout_secs: u64,
}

impl MailerSettings {
    /// Load mailer settings from the given environment provider
    ///
    /// # Errors
    /// Returns `ApplicationError::MissingSecret` when `RESEND_API_KEY` is
    /// absent or empty, and `ApplicationError::InvalidSetting` for an
    /// unparseable timeout.
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let api_key = env_provider
            .get_var("RESEND_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApplicationError::missing_secret("RESEND_API_KEY"))?;

        let api_base = env_provider
            .get_var("MAIL_API_BASE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let from_address = env_provider
            .get_var("MAIL_FROM")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FROM.to_string());

        let reply_to = env_provider.get_var("MAIL_REPLY_TO").filter(|v| !v.is_empty());

        let send_timeout_secs = match env_provider.get_var("MAIL_SEND_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|t| *t > 0).ok_or_else(|| {
                ApplicationError::invalid_setting(
                    "MAIL_SEND_TIMEOUT_SECS",
                    format!("expected a positive number of seconds, got '{}'", raw),
                )
            })?,
            None => DEFAULT_SEND_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base,
            from_address,
            reply_to,
            send_timeout_secs,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    pub fn send_timeout_secs(&self) -> u64 {
        self.send_timeout_secs
    }

    /// Build settings directly, bypassing the environment.
    ///
    /// Intended for tests that point the mailer at a local stub channel.
    #[cfg(test)]
    pub fn for_tests(api_base: &str, send_timeout_secs: u64) -> Self {
        Self {
            api_key: "re_test_key".to_string(),
            api_base: api_base.to_string(),
            from_address: DEFAULT_FROM.to_string(),
            reply_to: None,
            send_timeout_secs,
        }
    }
}

impl fmt::Debug for MailerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("from_address", &self.from_address)
            .field("reply_to", &self.reply_to)
            .field("send_timeout_secs", &self.send_timeout_secs)
            .finish()
    }
}

impl fmt::Display for MailerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MailerSettings {{ api_key: <redacted>, api_base: {}, from_address: {} }}",
            self.api_base, self.from_address
        )
    }
}
