//! Clinic settings and logo management.

use crate::CLINIC_MANAGER_ROLE;
use crate::domain::clinic::{ClinicSettings, LogoUpload};
use crate::forms::settings::{ClinicSettingsForm, UploadLogoForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, require_clinic};

pub async fn load_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ClinicSettings>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    repo.get_settings().await.map_err(|err| {
        log::error!("Failed to load clinic settings: {err}");
        ServiceError::from(err)
    })
}

/// Validates opening hours and slot length, then stores the settings.
pub async fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ClinicSettingsForm,
) -> ServiceResult<ClinicSettings>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let settings = ClinicSettings::try_from(form)?;

    repo.update_settings(&settings).await.map_err(|err| {
        log::error!("Failed to update clinic settings: {err}");
        ServiceError::from(err)
    })
}

pub async fn upload_logo<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UploadLogoForm,
) -> ServiceResult<()>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let logo = LogoUpload::try_from(form)?;
    repo.upload_logo(&logo).await.map_err(|err| {
        log::error!("Failed to upload logo {}: {err}", logo.file_name);
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use actix_multipart::form::tempfile::TempFile;
    use chrono::NaiveTime;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with;

    fn manager() -> AuthenticatedUser {
        user_with(&["clinic_manager"], Some(2))
    }

    fn logo_form(bytes: &[u8]) -> UploadLogoForm {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        UploadLogoForm {
            logo: TempFile {
                file,
                content_type: Some("image/png".parse().unwrap()),
                file_name: Some("logo.png".to_string()),
                size: bytes.len(),
            },
        }
    }

    fn form(opening: &str, closing: &str) -> ClinicSettingsForm {
        ClinicSettingsForm {
            name: "Harbor Dental".to_string(),
            phone: String::new(),
            address: "1 Pier Rd".to_string(),
            opening_time: opening.to_string(),
            closing_time: closing.to_string(),
            slot_minutes: 20,
        }
    }

    /// Valid settings are stored and the backend copy returned.
    #[tokio::test]
    async fn save_settings_stores_valid_form() {
        let mut repo = MockRepository::new();
        repo.expect_update_settings()
            .withf(|s| s.slot_minutes == 20 && s.phone.is_none())
            .returning(|s| Ok(s.clone()));

        let saved = save_settings(&repo, &manager(), form("08:30", "18:00"))
            .await
            .unwrap();

        assert_eq!(saved.opening_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    /// Opening after closing never reaches the backend.
    #[tokio::test]
    async fn inverted_hours_are_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_update_settings().never();

        let result = save_settings(&repo, &manager(), form("18:00", "08:00")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    /// Backend outages are reported as unavailable.
    #[tokio::test]
    async fn load_settings_when_backend_is_down() {
        let mut repo = MockRepository::new();
        repo.expect_get_settings().returning(|| {
            Err(RepositoryError::Server {
                status: 503,
                message: "maintenance".to_string(),
            })
        });

        assert!(matches!(
            load_settings(&repo, &manager()).await,
            Err(ServiceError::Unavailable(_))
        ));
    }

    /// A validated logo is forwarded as is.
    #[tokio::test]
    async fn logo_is_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_upload_logo()
            .withf(|logo| logo.content_type == "image/png" && logo.bytes.len() == 4)
            .returning(|_| Ok(()));

        assert!(upload_logo(&repo, &manager(), logo_form(&[1, 2, 3, 4])).await.is_ok());
    }

    /// Secretaries cannot replace the logo.
    #[tokio::test]
    async fn logo_upload_requires_manager() {
        let mut repo = MockRepository::new();
        repo.expect_upload_logo().never();

        let result = upload_logo(
            &repo,
            &user_with(&["secretary"], Some(2)),
            logo_form(&[1, 2, 3, 4]),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
