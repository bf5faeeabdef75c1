use std::fmt;
use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

const DEFAULT_DATABASE_URL: &str = "sqlite://waitlist.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Bootstrap settings for infrastructure configuration
///
/// Covers the pieces needed before any store or service exists: where the
/// database lives and where the server listens.
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
}

impl BootstrapSettings {
    /// Load bootstrap settings from the given environment provider
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let database_url = env_provider
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.is_empty() {
            return Err(ApplicationError::invalid_setting(
                "DATABASE_URL",
                "cannot be empty",
            ));
        }

        let server_host = env_provider
            .get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if server_host.is_empty() {
            return Err(ApplicationError::invalid_setting("HOST", "cannot be empty"));
        }

        let server_port = match env_provider.get_var("PORT") {
            Some(raw) => raw.parse::<u16>().ok().filter(|p| *p > 0).ok_or_else(|| {
                ApplicationError::invalid_setting(
                    "PORT",
                    format!("expected port number between 1 and 65535, got '{}'", raw),
                )
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}
