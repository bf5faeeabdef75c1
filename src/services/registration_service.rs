use std::sync::Arc;

use crate::services::validator::{FieldViolation, RegistrationValidator};
use crate::stores::RegistrantStore;
use crate::types::db::registrant;
use crate::types::dto::register::RegisterRequest;

/// Outcome of reconciling one submission against the waitlist
#[derive(Debug)]
pub enum RegistrationOutcome {
    /// Validation failed; nothing touched the store
    Rejected(Vec<FieldViolation>),

    /// The store could not save the registration; carries a caller-safe
    /// message, never the underlying source error
    PersistenceFailed(String),

    /// The registration is durably saved
    Persisted {
        registrant: registrant::Model,
        was_new: bool,
    },
}

/// Reconciles submissions against existing registrations
///
/// Stateless per invocation: validation runs first and gates all store
/// access, then the store's upsert decides between fresh signup and
/// update-in-place. `was_new` exists for caller-side messaging only.
pub struct RegistrationService {
    validator: Arc<RegistrationValidator>,
    registrant_store: Arc<RegistrantStore>,
}

impl RegistrationService {
    pub fn new(
        validator: Arc<RegistrationValidator>,
        registrant_store: Arc<RegistrantStore>,
    ) -> Self {
        Self {
            validator,
            registrant_store,
        }
    }

    /// Validate and persist one submission
    pub async fn register(&self, raw: &RegisterRequest) -> RegistrationOutcome {
        let submission = match self.validator.validate(raw) {
            Ok(submission) => submission,
            Err(violations) => {
                tracing::debug!(
                    violation_count = violations.len(),
                    "Registration rejected by validation"
                );
                return RegistrationOutcome::Rejected(violations);
            }
        };

        match self.registrant_store.upsert(&submission).await {
            Ok((registrant, was_new)) => {
                tracing::info!(email = %registrant.email, was_new, "Registration persisted");
                RegistrationOutcome::Persisted {
                    registrant,
                    was_new,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist registration");
                RegistrationOutcome::PersistenceFailed(
                    "Registration could not be saved".to_string(),
                )
            }
        }
    }
}
