use serde::Deserialize;

use crate::domain::clinic::ClinicDecision;
use crate::domain::types::FreeText;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct RejectClinicForm {
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<RejectClinicForm> for ClinicDecision {
    type Error = FormError;

    fn try_from(form: RejectClinicForm) -> Result<Self, Self::Error> {
        let reason = FreeText::new(form.reason).map_err(|_| FormError::MissingReason)?;
        Ok(ClinicDecision::Reject(reason))
    }
}

#[derive(Debug, Default, Deserialize)]
/// Filters accepted by the admin clinic list.
pub struct ClinicFilterQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}
