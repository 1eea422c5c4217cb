use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::NaiveTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::clinic::{ClinicSettings, LogoUpload};
use crate::domain::types::{ClinicName, PhoneNumber};
use crate::forms::FormError;

/// Largest accepted logo, in bytes.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

const LOGO_CONTENT_TYPES: [&str; 2] = ["image/png", "image/jpeg"];

#[derive(Debug, Deserialize, Validate)]
pub struct ClinicSettingsForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub opening_time: String,
    pub closing_time: String,
    #[validate(range(min = 5, max = 240))]
    pub slot_minutes: u16,
}

fn parse_hour(value: &str) -> Result<NaiveTime, FormError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| FormError::InvalidDateTime)
}

impl TryFrom<ClinicSettingsForm> for ClinicSettings {
    type Error = FormError;

    fn try_from(form: ClinicSettingsForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let opening_time = parse_hour(&form.opening_time)?;
        let closing_time = parse_hour(&form.closing_time)?;
        if opening_time >= closing_time {
            return Err(FormError::InvalidHours);
        }

        let phone = match form.phone.trim() {
            "" => None,
            raw => Some(PhoneNumber::new(raw)?.into_inner()),
        };
        let address = form.address.trim();

        Ok(Self {
            name: ClinicName::new(form.name)?.into_inner(),
            phone,
            address: (!address.is_empty()).then(|| address.to_string()),
            opening_time,
            closing_time,
            slot_minutes: form.slot_minutes,
            logo_url: None,
        })
    }
}

#[derive(MultipartForm)]
pub struct UploadLogoForm {
    #[multipart(limit = "4MB")]
    pub logo: TempFile,
}

/// Checks type and size of an uploaded logo before it is forwarded.
pub fn validate_logo(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<LogoUpload, FormError> {
    let content_type = content_type
        .filter(|ct| LOGO_CONTENT_TYPES.contains(ct))
        .ok_or(FormError::UnsupportedFileType)?;

    if bytes.is_empty() {
        return Err(FormError::Upload("empty file".to_string()));
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(FormError::FileTooLarge(MAX_LOGO_BYTES));
    }

    Ok(LogoUpload {
        file_name: file_name.unwrap_or("logo").to_string(),
        content_type: content_type.to_string(),
        bytes,
    })
}

impl TryFrom<UploadLogoForm> for LogoUpload {
    type Error = FormError;

    fn try_from(form: UploadLogoForm) -> Result<Self, Self::Error> {
        let content_type = form
            .logo
            .content_type
            .as_ref()
            .map(|mime| mime.essence_str().to_string());
        if form.logo.size > MAX_LOGO_BYTES {
            return Err(FormError::FileTooLarge(MAX_LOGO_BYTES));
        }
        let bytes = std::fs::read(form.logo.file.path())
            .map_err(|e| FormError::Upload(e.to_string()))?;

        validate_logo(
            form.logo.file_name.as_deref(),
            content_type.as_deref(),
            bytes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ClinicSettingsForm {
        ClinicSettingsForm {
            name: "Sunrise".to_string(),
            phone: String::new(),
            address: "12 Harbour St".to_string(),
            opening_time: "08:00".to_string(),
            closing_time: "16:30".to_string(),
            slot_minutes: 20,
        }
    }

    #[test]
    fn settings_form_converts() {
        let settings = ClinicSettings::try_from(form()).unwrap();
        assert_eq!(settings.phone, None);
        assert_eq!(settings.closing_time, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
    }

    #[test]
    fn closing_before_opening_is_rejected() {
        let mut form = form();
        form.closing_time = "07:00".to_string();
        assert!(matches!(
            ClinicSettings::try_from(form),
            Err(FormError::InvalidHours)
        ));
    }

    #[test]
    fn slot_length_is_bounded() {
        let mut form = form();
        form.slot_minutes = 1;
        assert!(matches!(
            ClinicSettings::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn logo_type_and_size_are_checked() {
        assert!(matches!(
            validate_logo(Some("logo.gif"), Some("image/gif"), vec![1]),
            Err(FormError::UnsupportedFileType)
        ));
        assert!(matches!(
            validate_logo(Some("logo.png"), Some("image/png"), vec![0; MAX_LOGO_BYTES + 1]),
            Err(FormError::FileTooLarge(_))
        ));

        let logo = validate_logo(None, Some("image/jpeg"), vec![0xFF, 0xD8]).unwrap();
        assert_eq!(logo.file_name, "logo");
        assert_eq!(logo.content_type, "image/jpeg");
    }
}
