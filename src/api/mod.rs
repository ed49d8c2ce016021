//! Patient-facing HTTP API.
//!
//! Exposes registration, login, doctor discovery, symptom-based doctor
//! recommendation and appointment management as HTTP endpoints. Routes
//! are nested under `/api/`; appointment and logout routes sit behind a
//! bearer-session auth middleware.
//!
//! The router is composable — `api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
