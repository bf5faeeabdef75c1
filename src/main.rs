use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use waitlist_backend::AppData;
use waitlist_backend::api::{HealthApi, WaitlistApi};
use waitlist_backend::config::{
    BootstrapSettings, LoggingConfig, MailerSettings, SystemEnvironment, WaitlistSettings,
    init_logging,
};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let logging_config = LoggingConfig::from_env_provider(Arc::new(SystemEnvironment));
    init_logging(&logging_config).expect("Failed to initialize logging");

    let bootstrap_settings = BootstrapSettings::from_env()
        .expect("Failed to load bootstrap settings");

    // Missing delivery credentials are a boot failure, not a per-request one
    let mailer_settings = MailerSettings::from_env()
        .expect("Failed to load mailer settings (is RESEND_API_KEY set?)");

    let waitlist_settings = WaitlistSettings::from_env()
        .expect("Failed to load waitlist settings");

    let db: DatabaseConnection = Database::connect(bootstrap_settings.database_url())
        .await
        .expect("Failed to connect to database");

    tracing::info!(database_url = %bootstrap_settings.database_url(), "Connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database migrations completed");

    let app_data = Arc::new(
        AppData::init(db, waitlist_settings, mailer_settings)
            .expect("Failed to initialize application data"),
    );

    let waitlist_api = WaitlistApi::new(Arc::clone(&app_data.registration_coordinator));

    let api_service = OpenApiService::new((HealthApi, waitlist_api), "Waitlist API", "1.0.0")
        .server(format!("http://{}/api", bootstrap_settings.server_address()));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui);

    tracing::info!(address = %bootstrap_settings.server_address(), "Starting server");

    Server::new(TcpListener::bind(bootstrap_settings.server_address()))
        .run(app)
        .await
}
