//! API middleware.
//!
//! A single layer: bearer session validation for the protected
//! appointment routes.

pub mod auth;
