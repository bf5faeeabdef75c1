use std::sync::Arc;

use crate::services::mailer::{Mailer, NotificationAttempt};
use crate::services::registration_service::{RegistrationOutcome, RegistrationService};
use crate::services::validator::FieldViolation;
use crate::types::dto::register::RegisterRequest;

/// The single value the presentation layer sees for one submission
///
/// `persisted` is the headline status; `notification_sent` is independent
/// and reports whether the delivery channel accepted the send request.
#[derive(Debug)]
pub struct RegistrationResult {
    pub persisted: bool,
    pub was_new: bool,
    pub notification_sent: bool,
    pub violations: Vec<FieldViolation>,
    pub error: Option<String>,
}

impl RegistrationResult {
    fn rejected(violations: Vec<FieldViolation>) -> Self {
        Self {
            persisted: false,
            was_new: false,
            notification_sent: false,
            violations,
            error: None,
        }
    }

    fn persistence_failed(message: String) -> Self {
        Self {
            persisted: false,
            was_new: false,
            notification_sent: false,
            violations: Vec::new(),
            error: Some(message),
        }
    }

    fn persisted(was_new: bool, attempt: NotificationAttempt) -> Self {
        Self {
            persisted: true,
            was_new,
            notification_sent: attempt.was_sent(),
            violations: Vec::new(),
            error: attempt.detail,
        }
    }
}

/// Composes the registration service and the mailer into one operation
///
/// Workflow only: validation and persistence outcomes short-circuit before
/// any notification is attempted, and a failed notification can never
/// unwind a persisted registration.
pub struct RegistrationCoordinator {
    registration_service: Arc<RegistrationService>,
    mailer: Arc<Mailer>,
}

impl RegistrationCoordinator {
    pub fn new(registration_service: Arc<RegistrationService>, mailer: Arc<Mailer>) -> Self {
        Self {
            registration_service,
            mailer,
        }
    }

    /// Handle one waitlist submission end to end
    pub async fn submit_registration(&self, request: &RegisterRequest) -> RegistrationResult {
        match self.registration_service.register(request).await {
            RegistrationOutcome::Rejected(violations) => RegistrationResult::rejected(violations),
            RegistrationOutcome::PersistenceFailed(message) => {
                RegistrationResult::persistence_failed(message)
            }
            RegistrationOutcome::Persisted {
                registrant,
                was_new,
            } => {
                // Strictly downstream of successful persistence; bounded by
                // the mailer's client timeout.
                let attempt = self.mailer.send_welcome(&registrant).await;
                RegistrationResult::persisted(was_new, attempt)
            }
        }
    }
}
