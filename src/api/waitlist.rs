use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::coordinators::{RegistrationCoordinator, RegistrationResult};
use crate::types::dto::common::ErrorResponse;
use crate::types::dto::register::{
    FieldViolationDto, RegisterApiResponse, RegisterRequest, RegistrationResponse,
    ValidationErrorResponse,
};

/// Waitlist API endpoints
pub struct WaitlistApi {
    coordinator: Arc<RegistrationCoordinator>,
}

impl WaitlistApi {
    pub fn new(coordinator: Arc<RegistrationCoordinator>) -> Self {
        Self { coordinator }
    }
}

/// API tags for waitlist endpoints
#[derive(Tags)]
enum WaitlistTags {
    /// Waitlist registration endpoints
    Waitlist,
}

#[OpenApi(prefix_path = "/waitlist")]
impl WaitlistApi {
    /// Join the waitlist
    ///
    /// Persists the registration (create-or-update keyed by email) and
    /// attempts a best-effort confirmation email. A failed email never
    /// fails the registration.
    #[oai(path = "/register", method = "post", tag = "WaitlistTags::Waitlist")]
    async fn register(&self, body: Json<RegisterRequest>) -> RegisterApiResponse {
        let result = self.coordinator.submit_registration(&body.0).await;
        into_api_response(result)
    }
}

fn into_api_response(result: RegistrationResult) -> RegisterApiResponse {
    if !result.violations.is_empty() {
        return RegisterApiResponse::ValidationFailed(Json(ValidationErrorResponse {
            error: "validation_failed".to_string(),
            violations: result
                .violations
                .into_iter()
                .map(|v| FieldViolationDto {
                    field: v.field,
                    message: v.message,
                })
                .collect(),
        }));
    }

    if !result.persisted {
        return RegisterApiResponse::PersistenceFailed(Json(ErrorResponse {
            error: "persistence_failed".to_string(),
            message: result
                .error
                .unwrap_or_else(|| "Registration could not be saved".to_string()),
            status_code: 500,
        }));
    }

    RegisterApiResponse::Ok(Json(RegistrationResponse {
        persisted: true,
        was_new: result.was_new,
        notification_sent: result.notification_sent,
        error: result.error,
    }))
}
