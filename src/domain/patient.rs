use serde::{Deserialize, Serialize};

use crate::domain::types::PatientId;

/// Lightweight patient record returned by the reception lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub id: PatientId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
