//! Doctor recommendation resolver.
//!
//! Two-tier resolution: a completion-API shortlist when a credential is
//! configured, substring tag matching as the always-available fallback.
//! The AI tier is advisory — any failure inside it degrades silently to
//! tag matching, and tag matching itself degrades to the full roster.

pub mod openai;
pub mod parser;
pub mod prompt;
pub mod resolver;

pub use openai::*;
pub use parser::*;
pub use prompt::*;
pub use resolver::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Symptom description must not be empty")]
    EmptySymptoms,

    #[error("Completion endpoint returned error (status {status}): {body}")]
    CompletionApi { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}
