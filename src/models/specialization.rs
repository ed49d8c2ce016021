use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medical specialization. `tags` is a comma-separated list of symptom
/// keywords used by the recommendation fallback path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialization {
    pub id: Uuid,
    pub name: String,
    pub tags: String,
}

impl Specialization {
    /// Tags as trimmed, lowercased keywords. Empty entries are dropped.
    pub fn keywords(&self) -> impl Iterator<Item = String> + '_ {
        self.tags
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
    }
}
