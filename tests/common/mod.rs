// Test utilities shared across integration tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use waitlist_backend::AppData;
use waitlist_backend::config::{MailerSettings, WaitlistSettings};
use waitlist_backend::types::dto::register::RegisterRequest;

/// Creates a fully wired application against an in-memory database
///
/// The delivery channel points at a local port nothing listens on, so every
/// notification attempt fails fast; registration flow tests exercise the
/// failure-isolation contract by default.
pub async fn setup_test_app() -> Arc<AppData> {
    unsafe {
        std::env::set_var("RESEND_API_KEY", "re_test_key");
        std::env::set_var("MAIL_API_BASE", "http://127.0.0.1:9");
        std::env::set_var("MAIL_SEND_TIMEOUT_SECS", "2");
    }

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let waitlist_settings = WaitlistSettings::from_env().expect("waitlist settings");
    let mailer_settings = MailerSettings::from_env().expect("mailer settings");

    Arc::new(AppData::init(db, waitlist_settings, mailer_settings).expect("init app data"))
}

pub fn register_request(
    full_name: &str,
    email: &str,
    phone_number: &str,
    interests: &[&str],
) -> RegisterRequest {
    RegisterRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
    }
}
