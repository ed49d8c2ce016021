pub const TRIAGE_SYSTEM_PROMPT: &str = "You are a triage assistant. Given patient symptoms, \
choose the most relevant doctor specializations from the provided list. Return JSON only.";

/// Build the triage prompt for one recommendation request. The
/// specialization list comes in pre-sorted so identical inputs produce
/// identical prompts.
pub fn build_triage_prompt(specializations: &[String], symptoms: &str) -> String {
    let mut listing = String::new();
    for name in specializations {
        listing.push_str("- ");
        listing.push_str(name);
        listing.push('\n');
    }

    format!(
        r#"Available specializations:
{listing}
Symptoms:
{symptoms}

Respond strictly as JSON: {{ "specializations": ["Spec1", "Spec2"] }}"#
    )
}
