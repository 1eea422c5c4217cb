use chrono::Weekday;
use serde::Deserialize;
use validator::Validate;

use crate::domain::staff::{NewDoctor, NewSecretary};
use crate::domain::types::{EmailAddress, Money, PersonName, PhoneNumber, Specialty};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Doctor creation form. `working_days` arrives as repeated checkbox values,
/// so the body is decoded with `serde_html_form`.
pub struct AddDoctorForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1, max = 80))]
    pub specialty: String,
    #[validate(range(min = 0.0, max = 100000.0))]
    pub consultation_fee: f64,
    #[serde(default)]
    pub working_days: Vec<String>,
}

impl AddDoctorForm {
    pub fn from_body(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }
}

impl TryFrom<AddDoctorForm> for NewDoctor {
    type Error = FormError;

    fn try_from(form: AddDoctorForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let mut working_days = form
            .working_days
            .iter()
            .map(|day| {
                day.trim()
                    .parse::<Weekday>()
                    .map_err(|_| FormError::InvalidWeekday(day.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        working_days.sort_by_key(|day| day.num_days_from_monday());
        working_days.dedup();

        Ok(Self {
            name: PersonName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            phone: PhoneNumber::new(form.phone)?,
            specialty: Specialty::new(form.specialty)?,
            consultation_fee: Money::from_decimal(form.consultation_fee)?,
            working_days,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddSecretaryForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
}

impl TryFrom<AddSecretaryForm> for NewSecretary {
    type Error = FormError;

    fn try_from(form: AddSecretaryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: PersonName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            phone: PhoneNumber::new(form.phone)?,
        })
    }
}

/// Desired state posted by the activate/deactivate button.
#[derive(Debug, Deserialize)]
pub struct ToggleStaffForm {
    pub active: bool,
}
