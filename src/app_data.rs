use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{ApplicationError, MailerSettings, WaitlistSettings};
use crate::coordinators::RegistrationCoordinator;
use crate::services::{Mailer, RegistrationService, RegistrationValidator};
use crate::stores::RegistrantStore;

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared via `Arc`.
///
/// # Architecture
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ registrant_store (Arc<RegistrantStore>)
///   ├─ validator (Arc<RegistrationValidator>)
///   ├─ mailer (Arc<Mailer>)
///   ├─ registration_service (Arc<RegistrationService>)
///   └─ registration_coordinator (Arc<RegistrationCoordinator>)
///   ↓ wrapped in Arc<AppData>
///   ↓ handed to the API layer
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub registrant_store: Arc<RegistrantStore>,
    pub validator: Arc<RegistrationValidator>,
    pub mailer: Arc<Mailer>,
    pub registration_service: Arc<RegistrationService>,
    pub registration_coordinator: Arc<RegistrationCoordinator>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be initialized and migrated before
    /// calling this. Settings are resolved by the caller so that missing
    /// delivery credentials abort boot before anything else is built.
    ///
    /// # Errors
    /// Returns `ApplicationError` when the mailer cannot be constructed
    pub fn init(
        db: DatabaseConnection,
        waitlist_settings: WaitlistSettings,
        mailer_settings: MailerSettings,
    ) -> Result<Self, ApplicationError> {
        tracing::info!("Initializing AppData...");

        let registrant_store = Arc::new(RegistrantStore::new(db.clone()));
        let validator = Arc::new(RegistrationValidator::new(Arc::new(waitlist_settings)));
        let mailer = Arc::new(Mailer::new(Arc::new(mailer_settings))?);

        let registration_service = Arc::new(RegistrationService::new(
            Arc::clone(&validator),
            Arc::clone(&registrant_store),
        ));

        let registration_coordinator = Arc::new(RegistrationCoordinator::new(
            Arc::clone(&registration_service),
            Arc::clone(&mailer),
        ));

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            registrant_store,
            validator,
            mailer,
            registration_service,
            registration_coordinator,
        })
    }
}
