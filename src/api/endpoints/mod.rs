//! API endpoint handlers.
//!
//! Each module corresponds to one resource of the booking service.

pub mod appointments;
pub mod auth;
pub mod doctors;
pub mod health;
