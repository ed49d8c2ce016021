use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::specialization::Specialization;

/// A doctor row, without its specializations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
}

/// A doctor together with the specializations they hold. This is the
/// shape the recommendation resolver works over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub name: String,
    pub specializations: Vec<Specialization>,
}

/// Response shape for doctor listings and recommendations.
///
/// `specialization` joins the names into one display string; the
/// `specializations` array carries them individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub specializations: Vec<String>,
    pub specialization: String,
}

impl DoctorSummary {
    pub fn from_profile(profile: &DoctorProfile) -> Self {
        let names: Vec<String> = profile
            .specializations
            .iter()
            .map(|s| s.name.clone())
            .collect();
        Self {
            id: profile.id,
            name: profile.name.clone(),
            specialization: names.join(", "),
            specializations: names,
        }
    }
}
