use chrono::NaiveDate;
use serde::Deserialize;

use crate::forms::FormError;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// `YYYY-MM-DD`; empty or missing means today.
    pub date: Option<String>,
}

impl ReportQuery {
    pub fn date_or(&self, today: NaiveDate) -> Result<NaiveDate, FormError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(today),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| FormError::InvalidDateTime),
        }
    }
}
