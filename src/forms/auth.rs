use serde::Deserialize;
use validator::Validate;

use crate::domain::clinic::NewClinicRegistration;
use crate::domain::types::{ClinicName, EmailAddress, LicenseNumber, PersonName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Public self-service registration of a new clinic and its manager.
pub struct RegisterClinicForm {
    #[validate(length(min = 2, max = 120))]
    pub clinic_name: String,
    #[validate(length(min = 1, max = 120))]
    pub manager_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub license_number: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub password_confirmation: String,
}

impl TryFrom<RegisterClinicForm> for NewClinicRegistration {
    type Error = FormError;

    fn try_from(form: RegisterClinicForm) -> Result<Self, Self::Error> {
        form.validate()?;

        if form.password != form.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }

        let address = form.address.trim();

        Ok(Self {
            clinic_name: ClinicName::new(form.clinic_name)?,
            manager_name: PersonName::new(form.manager_name)?,
            email: EmailAddress::new(form.email)?,
            phone: PhoneNumber::new(form.phone)?,
            address: (!address.is_empty()).then(|| address.to_string()),
            license_number: LicenseNumber::new(form.license_number)?,
            password: form.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterClinicForm {
        RegisterClinicForm {
            clinic_name: "Sunrise Family Clinic".to_string(),
            manager_name: "Amal Haddad".to_string(),
            email: "Owner@Sunrise.test".to_string(),
            phone: "+44 20 7946 0018".to_string(),
            address: "  ".to_string(),
            license_number: "lic-2026".to_string(),
            password: "correct horse".to_string(),
            password_confirmation: "correct horse".to_string(),
        }
    }

    #[test]
    fn valid_registration_is_normalized() {
        let registration = NewClinicRegistration::try_from(valid_form()).unwrap();

        assert_eq!(registration.email.as_str(), "owner@sunrise.test");
        assert_eq!(registration.phone.as_str(), "+442079460018");
        assert_eq!(registration.license_number.as_str(), "LIC-2026");
        assert_eq!(registration.address, None);
    }

    #[test]
    fn short_password_fails_validation() {
        let mut form = valid_form();
        form.password = "short".to_string();
        form.password_confirmation = "short".to_string();

        assert!(matches!(
            NewClinicRegistration::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut form = valid_form();
        form.password_confirmation = "something else".to_string();

        assert!(matches!(
            NewClinicRegistration::try_from(form),
            Err(FormError::PasswordMismatch)
        ));
    }

    #[test]
    fn bad_license_number_is_rejected() {
        let mut form = valid_form();
        form.license_number = "no spaces allowed".to_string();

        assert!(matches!(
            NewClinicRegistration::try_from(form),
            Err(FormError::InvalidLicense)
        ));
    }
}
