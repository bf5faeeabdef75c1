// Services layer - Business logic
pub mod mailer;
pub mod registration_service;
pub mod validator;

pub use mailer::{Mailer, NotificationAttempt, NotificationOutcome};
pub use registration_service::{RegistrationOutcome, RegistrationService};
pub use validator::RegistrationValidator;
