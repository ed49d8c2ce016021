use std::collections::HashSet;

use uuid::Uuid;

use super::openai::{CompletionClient, OpenAiClient};
use super::parser::parse_specialization_reply;
use super::prompt::{build_triage_prompt, TRIAGE_SYSTEM_PROMPT};
use super::RecommendError;
use crate::config::OpenAiConfig;
use crate::models::{DoctorProfile, DoctorSummary};

/// Resolves free-text symptoms against a doctor roster.
///
/// With a configured client the completion API picks specializations
/// first; tag matching covers every failure mode and the unconfigured
/// case. Neither path ranks — the result is a set.
pub struct DoctorRecommender {
    client: Option<Box<dyn CompletionClient + Send + Sync>>,
    model: String,
}

impl DoctorRecommender {
    pub fn new(client: Option<Box<dyn CompletionClient + Send + Sync>>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }

    /// Build from configuration. Without an API key the AI path is
    /// never attempted.
    pub fn from_config(config: &OpenAiConfig) -> Self {
        let client: Option<Box<dyn CompletionClient + Send + Sync>> =
            config.api_key.as_deref().map(|key| {
                Box::new(OpenAiClient::new(&config.base_url, key, config.timeout_secs))
                    as Box<dyn CompletionClient + Send + Sync>
            });
        Self::new(client, &config.model)
    }

    pub fn ai_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Recommend doctors for a symptom description.
    ///
    /// Blank symptoms are the only caller-visible error. An empty
    /// roster gives an empty result; everything else gives at least
    /// the full roster back.
    pub fn recommend(
        &self,
        symptoms: &str,
        roster: &[DoctorProfile],
    ) -> Result<Vec<DoctorSummary>, RecommendError> {
        if symptoms.trim().is_empty() {
            return Err(RecommendError::EmptySymptoms);
        }
        if roster.is_empty() {
            return Ok(Vec::new());
        }

        let matched = self
            .client
            .as_deref()
            .and_then(|client| self.ai_shortlist(client, symptoms, roster))
            .unwrap_or_else(|| tag_matches(symptoms, roster));

        Ok(matched.iter().map(|p| DoctorSummary::from_profile(p)).collect())
    }

    /// Completion-API path. `None` means no usable result — transport
    /// or API failure, nothing parseable in the reply, or no doctor
    /// holding a suggested name — and sends the caller to tag matching.
    fn ai_shortlist<'a>(
        &self,
        client: &(dyn CompletionClient + Send + Sync),
        symptoms: &str,
        roster: &'a [DoctorProfile],
    ) -> Option<Vec<&'a DoctorProfile>> {
        let names = distinct_specialization_names(roster);
        if names.is_empty() {
            return None;
        }

        let prompt = build_triage_prompt(&names, symptoms);
        let reply = match client.complete(&self.model, TRIAGE_SYSTEM_PROMPT, &prompt) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!("completion request failed, using tag matching: {e}");
                return None;
            }
        };

        let candidates = parse_specialization_reply(&reply);
        if candidates.is_empty() {
            tracing::debug!("completion reply held no specialization names");
            return None;
        }

        let wanted: HashSet<String> = candidates.iter().map(|c| c.to_lowercase()).collect();
        let matched: Vec<&DoctorProfile> = roster
            .iter()
            .filter(|doctor| {
                doctor
                    .specializations
                    .iter()
                    .any(|s| wanted.contains(&s.name.to_lowercase()))
            })
            .collect();

        if matched.is_empty() {
            tracing::debug!("no doctor holds a suggested specialization");
            return None;
        }
        Some(matched)
    }
}

/// Distinct specialization names across the roster, sorted so the
/// prompt is deterministic for a given roster snapshot.
fn distinct_specialization_names(roster: &[DoctorProfile]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for doctor in roster {
        for spec in &doctor.specializations {
            if seen.insert(spec.name.clone()) {
                names.push(spec.name.clone());
            }
        }
    }
    names.sort();
    names
}

/// Tag-based path. A specialization matches when any of its keywords is
/// a substring of the lower-cased symptom text; a doctor matches when
/// any of their specializations matched. Zero matches degrades to no
/// filtering: the whole roster comes back.
fn tag_matches<'a>(symptoms: &str, roster: &'a [DoctorProfile]) -> Vec<&'a DoctorProfile> {
    let symptoms = symptoms.to_lowercase();

    let mut scanned: HashSet<Uuid> = HashSet::new();
    let mut matched_specs: HashSet<Uuid> = HashSet::new();
    for doctor in roster {
        for spec in &doctor.specializations {
            if !scanned.insert(spec.id) {
                continue; // shared specialization, already scanned
            }
            if spec.keywords().any(|tag| symptoms.contains(&tag)) {
                matched_specs.insert(spec.id);
            }
        }
    }

    if matched_specs.is_empty() {
        return roster.iter().collect();
    }

    roster
        .iter()
        .filter(|doctor| {
            doctor
                .specializations
                .iter()
                .any(|s| matched_specs.contains(&s.id))
        })
        .collect()
}
