// API layer - HTTP endpoint definitions
pub mod health;
pub mod waitlist;

pub use health::HealthApi;
pub use waitlist::WaitlistApi;
