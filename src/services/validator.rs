use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::WaitlistSettings;
use crate::types::dto::register::RegisterRequest;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9._%+-]*@[a-z0-9][a-z0-9.-]*\.[a-z]{2,}$")
        .expect("valid email regex")
});
static FULL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L}' -]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\- ]+$").expect("valid phone regex"));

const FULL_NAME_MIN_LEN: usize = 2;
const PHONE_MIN_LEN: usize = 10;
const PHONE_MAX_LEN: usize = 20;

/// A single field-level rejection produced by validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A submission that passed validation, with all values normalized
///
/// `email` is trimmed and lower-cased; `interests` preserves submission
/// order with duplicates collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub interests: Vec<String>,
}

/// Validates raw registration submissions against the configured catalog
///
/// Pure: no I/O, no shared state beyond the settings snapshot taken at
/// construction. Every rule is checked so the caller receives the complete
/// list of violations in one pass, and any violation blocks the whole
/// submission.
pub struct RegistrationValidator {
    settings: Arc<WaitlistSettings>,
}

impl RegistrationValidator {
    pub fn new(settings: Arc<WaitlistSettings>) -> Self {
        Self { settings }
    }

    /// Validate and normalize a raw submission
    ///
    /// # Returns
    /// * `Ok(ValidSubmission)` - All fields valid, values normalized
    /// * `Err(violations)` - One entry per failed field rule
    pub fn validate(&self, raw: &RegisterRequest) -> Result<ValidSubmission, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let full_name = raw.full_name.trim().to_string();
        if full_name.chars().count() < FULL_NAME_MIN_LEN {
            violations.push(FieldViolation::new(
                "full_name",
                "Full name must be at least 2 characters",
            ));
        } else if !FULL_NAME_RE.is_match(&full_name) {
            violations.push(FieldViolation::new(
                "full_name",
                "Full name may only contain letters, spaces, hyphens and apostrophes",
            ));
        }

        let email = raw.email.trim().to_lowercase();
        if !EMAIL_RE.is_match(&email) {
            violations.push(FieldViolation::new("email", "Invalid email address"));
        }

        let phone_number = raw.phone_number.trim().to_string();
        let phone_len = phone_number.chars().count();
        if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone_len) {
            violations.push(FieldViolation::new(
                "phone_number",
                "Phone number must be between 10 and 20 characters",
            ));
        } else if !PHONE_RE.is_match(&phone_number) {
            violations.push(FieldViolation::new(
                "phone_number",
                "Phone number may only contain digits, spaces, +, - and parentheses",
            ));
        }

        let interests = self.check_interests(&raw.interests, &mut violations);

        if violations.is_empty() {
            Ok(ValidSubmission {
                email,
                full_name,
                phone_number,
                interests,
            })
        } else {
            Err(violations)
        }
    }

    /// Collapse duplicates preserving first occurrence, then check count and
    /// catalog membership
    fn check_interests(
        &self,
        raw_interests: &[String],
        violations: &mut Vec<FieldViolation>,
    ) -> Vec<String> {
        let mut interests: Vec<String> = Vec::new();
        for tag in raw_interests {
            let tag = tag.trim().to_string();
            if !interests.contains(&tag) {
                interests.push(tag);
            }
        }

        if interests.is_empty() {
            violations.push(FieldViolation::new(
                "interests",
                "Please select at least one interest",
            ));
            return interests;
        }

        let max = self.settings.max_interests();
        if interests.len() > max {
            violations.push(FieldViolation::new(
                "interests",
                format!("You can only select up to {} interests", max),
            ));
            return interests;
        }

        for tag in &interests {
            if !self.settings.catalog_contains(tag) {
                violations.push(FieldViolation::new(
                    "interests",
                    format!("Unknown interest '{}'", tag),
                ));
            }
        }

        interests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn test_validator() -> RegistrationValidator {
        let settings = WaitlistSettings::from_env_provider(Arc::new(MockEnvironment::empty()))
            .expect("default waitlist settings");
        RegistrationValidator::new(Arc::new(settings))
    }

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            phone_number: "+1 212 555 0100".to_string(),
            interests: vec!["Birthday".to_string(), "Wedding".to_string()],
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let validator = test_validator();

        let submission = validator.validate(&valid_request()).unwrap();

        assert_eq!(submission.email, "ada@x.com");
        assert_eq!(submission.full_name, "Ada Lovelace");
        assert_eq!(submission.phone_number, "+1 212 555 0100");
        assert_eq!(submission.interests, vec!["Birthday", "Wedding"]);
    }

    #[test]
    fn test_email_is_normalized() {
        let validator = test_validator();
        let mut request = valid_request();
        request.email = "  ADA@X.COM ".to_string();

        let submission = validator.validate(&request).unwrap();

        assert_eq!(submission.email, "ada@x.com");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let validator = test_validator();

        for bad_email in ["", "not-an-email", "a@b", "a b@x.com", "@x.com"] {
            let mut request = valid_request();
            request.email = bad_email.to_string();

            let violations = validator.validate(&request).unwrap_err();

            assert!(
                violations.iter().any(|v| v.field == "email"),
                "expected email violation for '{}'",
                bad_email
            );
        }
    }

    #[test]
    fn test_short_name_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.full_name = " A ".to_string();

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations.iter().any(|v| v.field == "full_name"));
    }

    #[test]
    fn test_name_with_digits_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.full_name = "Ada L0velace".to_string();

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations.iter().any(|v| v.field == "full_name"));
    }

    #[test]
    fn test_name_with_hyphen_and_apostrophe_accepted() {
        let validator = test_validator();
        let mut request = valid_request();
        request.full_name = "Anne-Marie O'Neill".to_string();

        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn test_phone_length_bounds() {
        let validator = test_validator();

        for bad_phone in ["123456789", "123456789012345678901"] {
            let mut request = valid_request();
            request.phone_number = bad_phone.to_string();

            let violations = validator.validate(&request).unwrap_err();

            assert!(
                violations.iter().any(|v| v.field == "phone_number"),
                "expected phone violation for '{}'",
                bad_phone
            );
        }
    }

    #[test]
    fn test_phone_with_letters_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.phone_number = "+1 212 CALL NOW".to_string();

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations.iter().any(|v| v.field == "phone_number"));
    }

    #[test]
    fn test_phone_with_parentheses_accepted() {
        let validator = test_validator();
        let mut request = valid_request();
        request.phone_number = "(212) 555-0100".to_string();

        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn test_no_interests_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.interests = vec![];

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations.iter().any(|v| v.field == "interests"));
    }

    #[test]
    fn test_too_many_interests_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.interests = vec![
            "Birthday".to_string(),
            "Wedding".to_string(),
            "Graduation".to_string(),
            "Christmas".to_string(),
        ];

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations.iter().any(|v| v.field == "interests"));
    }

    #[test]
    fn test_duplicate_interests_collapse() {
        let validator = test_validator();
        let mut request = valid_request();
        request.interests = vec![
            "Wedding".to_string(),
            "Birthday".to_string(),
            "Wedding".to_string(),
        ];

        let submission = validator.validate(&request).unwrap();

        assert_eq!(submission.interests, vec!["Wedding", "Birthday"]);
    }

    #[test]
    fn test_unknown_interest_rejected() {
        let validator = test_validator();
        let mut request = valid_request();
        request.interests = vec!["Skydiving".to_string()];

        let violations = validator.validate(&request).unwrap_err();

        assert!(violations
            .iter()
            .any(|v| v.field == "interests" && v.message.contains("Skydiving")));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let validator = test_validator();
        let request = RegisterRequest {
            full_name: "A".to_string(),
            email: "nope".to_string(),
            phone_number: "123".to_string(),
            interests: vec![],
        };

        let violations = validator.validate(&request).unwrap_err();

        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"full_name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"phone_number"));
        assert!(fields.contains(&"interests"));
    }
}
