// Coordinators layer - Workflow orchestration
//
// Coordinators compose service operations for specific API endpoints. They
// determine the sequence of operations without containing business logic
// themselves.
pub mod registration_coordinator;

pub use registration_coordinator::{RegistrationCoordinator, RegistrationResult};
