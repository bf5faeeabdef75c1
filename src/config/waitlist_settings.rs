use std::sync::Arc;

use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

const DEFAULT_MAX_INTERESTS: usize = 3;

/// Built-in interest catalog, used unless `INTERESTS_CATALOG` overrides it
const DEFAULT_INTERESTS_CATALOG: &[&str] = &[
    "Birthday",
    "Anniversary",
    "Wedding",
    "Graduation",
    "Baby Shower",
    "House Warming",
    "Christmas",
    "Valentine's Day",
    "Mother's Day",
    "Father's Day",
    "New Year",
    "Retirement",
];

/// Settings governing what a registration submission may contain
#[derive(Debug, Clone)]
pub struct WaitlistSettings {
    max_interests: usize,
    interests_catalog: Vec<String>,
}

impl WaitlistSettings {
    /// Load waitlist settings from the given environment provider
    ///
    /// `MAX_INTERESTS` caps how many interest tags one submission may carry;
    /// `INTERESTS_CATALOG` is a comma-separated replacement for the built-in
    /// catalog.
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ApplicationError> {
        let max_interests = match env_provider.get_var("MAX_INTERESTS") {
            Some(raw) => raw.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ApplicationError::invalid_setting(
                    "MAX_INTERESTS",
                    format!("expected a positive number, got '{}'", raw),
                )
            })?,
            None => DEFAULT_MAX_INTERESTS,
        };

        let interests_catalog = match env_provider.get_var("INTERESTS_CATALOG") {
            Some(raw) => {
                let catalog: Vec<String> = raw
                    .split(',')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect();
                if catalog.is_empty() {
                    return Err(ApplicationError::invalid_setting(
                        "INTERESTS_CATALOG",
                        "must contain at least one tag",
                    ));
                }
                catalog
            }
            None => DEFAULT_INTERESTS_CATALOG
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
        };

        Ok(Self {
            max_interests,
            interests_catalog,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn max_interests(&self) -> usize {
        self.max_interests
    }

    pub fn interests_catalog(&self) -> &[String] {
        &self.interests_catalog
    }

    pub fn catalog_contains(&self, tag: &str) -> bool {
        self.interests_catalog.iter().any(|known| known == tag)
    }
}
