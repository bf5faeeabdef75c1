// DTO definitions for the HTTP API surface
pub mod common;
pub mod register;
