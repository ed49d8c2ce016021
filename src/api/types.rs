//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::app_state::AppState;
use crate::config::SESSION_TTL_SECS;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
/// Wraps `AppState` plus the in-memory session store.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            sessions: Arc::new(Mutex::new(SessionStore::new())),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Patient context — injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated patient context, injected into request extensions
/// by the auth middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct PatientContext {
    pub patient_id: Uuid,
    pub patient_name: String,
}

// ═══════════════════════════════════════════════════════════
// Session store — bearer tokens for logged-in patients
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    patient_id: Uuid,
    patient_name: String,
    expires_at: Instant,
}

/// In-memory session store keyed by token hash. Only the hash is
/// retained; the raw token exists client-side only. Sessions last
/// eight hours and stale entries are dropped on the next issue.
pub struct SessionStore {
    sessions: HashMap<[u8; 32], SessionEntry>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            ttl: Duration::from_secs(SESSION_TTL_SECS),
        }
    }

    /// Issue a session token for a patient. Returns the raw token.
    pub fn issue(&mut self, patient_id: Uuid, patient_name: &str) -> String {
        self.cleanup();
        let token = generate_token();
        self.sessions.insert(
            hash_token(&token),
            SessionEntry {
                patient_id,
                patient_name: patient_name.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        token
    }

    /// Resolve a raw token to the patient it was issued for.
    pub fn validate(&self, token: &str) -> Option<PatientContext> {
        let entry = self.sessions.get(&hash_token(token))?;
        if Instant::now() > entry.expires_at {
            return None;
        }
        Some(PatientContext {
            patient_id: entry.patient_id,
            patient_name: entry.patient_name.clone(),
        })
    }

    /// Drop the session for this token, if any. Returns whether one
    /// existed.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(&hash_token(token)).is_some()
    }

    fn cleanup(&mut self) {
        let now = Instant::now();
        self.sessions.retain(|_, entry| now < entry.expires_at);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        let h1 = hash_token("test");
        let h2 = hash_token("test");
        assert_eq!(h1, h2);
    }

    #[test]
    fn hash_token_differs_for_different_inputs() {
        let h1 = hash_token("token-a");
        let h2 = hash_token("token-b");
        assert_ne!(h1, h2);
    }

    #[test]
    fn session_issue_and_validate() {
        let mut store = SessionStore::new();
        let patient_id = Uuid::new_v4();
        let token = store.issue(patient_id, "Ana");

        let ctx = store.validate(&token).unwrap();
        assert_eq!(ctx.patient_id, patient_id);
        assert_eq!(ctx.patient_name, "Ana");
    }

    #[test]
    fn session_rejects_unknown_token() {
        let store = SessionStore::new();
        assert!(store.validate("not-a-token").is_none());
    }

    #[test]
    fn session_expired_token_rejected() {
        let mut store = SessionStore::new();
        let token = generate_token();
        store.sessions.insert(
            hash_token(&token),
            SessionEntry {
                patient_id: Uuid::new_v4(),
                patient_name: "Ana".into(),
                expires_at: Instant::now() - Duration::from_secs(1),
            },
        );
        assert!(store.validate(&token).is_none());
    }

    #[test]
    fn issue_cleans_up_stale_sessions() {
        let mut store = SessionStore::new();
        store.sessions.insert(
            hash_token("stale"),
            SessionEntry {
                patient_id: Uuid::new_v4(),
                patient_name: "Old".into(),
                expires_at: Instant::now() - Duration::from_secs(1),
            },
        );

        store.issue(Uuid::new_v4(), "Ana");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn revoke_drops_the_session() {
        let mut store = SessionStore::new();
        let token = store.issue(Uuid::new_v4(), "Ana");

        assert!(store.revoke(&token));
        assert!(store.validate(&token).is_none());
        assert!(!store.revoke(&token));
        assert!(store.is_empty());
    }

    #[test]
    fn sessions_are_independent() {
        let mut store = SessionStore::new();
        let ana = Uuid::new_v4();
        let ben = Uuid::new_v4();
        let t1 = store.issue(ana, "Ana");
        let t2 = store.issue(ben, "Ben");

        assert_eq!(store.validate(&t1).unwrap().patient_id, ana);
        assert_eq!(store.validate(&t2).unwrap().patient_id, ben);
    }
}
