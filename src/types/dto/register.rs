use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::dto::common::ErrorResponse;

/// Request model for a waitlist registration submission
///
/// Field values arrive as collected by the presentation layer; normalization
/// and validation happen server-side before anything is persisted.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Full name of the registrant
    pub full_name: String,

    /// Email address (used as the unique waitlist identity)
    pub email: String,

    /// Contact phone number
    pub phone_number: String,

    /// Selected interest tags from the published catalog
    pub interests: Vec<String>,
}

/// Response model for a persisted registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    /// Whether the registration was durably saved (headline status)
    pub persisted: bool,

    /// True for a first-time signup, false for an update to an existing entry
    pub was_new: bool,

    /// Whether the delivery channel accepted the confirmation email.
    /// Reports acceptance of the send request, not confirmed delivery.
    pub notification_sent: bool,

    /// Diagnostic message for a failed notification, when available
    pub error: Option<String>,
}

/// A single field-level validation failure
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolationDto {
    /// Name of the rejected field
    pub field: String,

    /// Human-readable reason the value was rejected
    pub message: String,
}

/// Response model for a rejected registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// Error type or category
    pub error: String,

    /// All field-level violations found in the submission
    pub violations: Vec<FieldViolationDto>,
}

/// API response for the register endpoint
#[derive(ApiResponse)]
pub enum RegisterApiResponse {
    /// Registration persisted; notification outcome reported alongside
    #[oai(status = 200)]
    Ok(Json<RegistrationResponse>),

    /// Submission rejected by validation, nothing was persisted
    #[oai(status = 400)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// Registration could not be saved
    #[oai(status = 500)]
    PersistenceFailed(Json<ErrorResponse>),
}
