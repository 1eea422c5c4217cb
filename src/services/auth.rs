//! Login and public clinic registration.

use validator::Validate;

use crate::domain::clinic::{Clinic, NewClinicRegistration};
use crate::forms::auth::{LoginForm, RegisterClinicForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::AccountGateway;
use crate::services::{ServiceError, ServiceResult};
use crate::{
    CLINIC_MANAGER_ROLE, DOCTOR_ROLE, PATIENT_ROLE, PLATFORM_ADMIN_ROLE, SECRETARY_ROLE,
};

/// Exchanges credentials for a bearer token issued by the backend.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<String>
where
    R: AccountGateway + ?Sized,
{
    form.validate().map_err(|err| {
        log::warn!("Rejected login form: {err}");
        ServiceError::Form("Invalid email or password".to_string())
    })?;

    let email = form.email.trim().to_lowercase();

    repo.login(&email, &form.password).await.map_err(|err| {
        log::error!("Login failed for {email}: {err}");
        match ServiceError::from(err) {
            ServiceError::Unauthenticated | ServiceError::Unauthorized => {
                ServiceError::Form("Invalid email or password".to_string())
            }
            other => other,
        }
    })
}

/// Validates the registration form and submits it for platform approval.
pub async fn register_clinic<R>(repo: &R, form: RegisterClinicForm) -> ServiceResult<Clinic>
where
    R: AccountGateway + ?Sized,
{
    let registration = NewClinicRegistration::try_from(form)?;

    repo.register_clinic(&registration).await.map_err(|err| {
        log::error!("Failed to register clinic {}: {err}", registration.clinic_name);
        ServiceError::from(err)
    })
}

/// Dashboard path of the user's highest role.
pub fn landing_path(user: &AuthenticatedUser) -> &'static str {
    const ORDER: [(&str, &str); 5] = [
        (PLATFORM_ADMIN_ROLE, "/admin"),
        (CLINIC_MANAGER_ROLE, "/manager"),
        (SECRETARY_ROLE, "/secretary"),
        (DOCTOR_ROLE, "/doctor"),
        (PATIENT_ROLE, "/patient"),
    ];

    ORDER
        .iter()
        .find(|(role, _)| user.has_role(role))
        .map(|(_, path)| *path)
        .unwrap_or("/na")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with;

    fn registration_form() -> RegisterClinicForm {
        RegisterClinicForm {
            clinic_name: "Harbor Dental".to_string(),
            manager_name: "Noor Saleh".to_string(),
            email: "noor@harbor.test".to_string(),
            phone: "+1 202 555 0143".to_string(),
            address: String::new(),
            license_number: "HD-0042".to_string(),
            password: "long enough".to_string(),
            password_confirmation: "long enough".to_string(),
        }
    }

    /// Highest role decides the landing page.
    #[test]
    fn landing_path_prefers_highest_role() {
        assert_eq!(landing_path(&user_with(&["doctor", "secretary"], Some(1))), "/secretary");
        assert_eq!(landing_path(&user_with(&["patient", "platform_admin"], None)), "/admin");
        assert_eq!(landing_path(&user_with(&["patient"], None)), "/patient");
        assert_eq!(landing_path(&user_with(&["billing"], None)), "/na");
    }

    /// Credentials are normalized and the backend token is returned.
    #[tokio::test]
    async fn login_returns_token() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|email, password| email == "desk@clinic.test" && password == "pw")
            .returning(|_, _| Ok("jwt".to_string()));

        let form = LoginForm {
            email: " Desk@Clinic.test ".trim().to_string(),
            password: "pw".to_string(),
        };

        assert_eq!(login(&repo, form).await.unwrap(), "jwt");
    }

    /// A 401 from the backend becomes a user-facing form error.
    #[tokio::test]
    async fn wrong_credentials_are_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .returning(|_, _| Err(RepositoryError::Unauthenticated));

        let form = LoginForm {
            email: "desk@clinic.test".to_string(),
            password: "bad".to_string(),
        };

        assert!(matches!(login(&repo, form).await, Err(ServiceError::Form(_))));
    }

    /// Invalid forms never reach the backend.
    #[tokio::test]
    async fn invalid_registration_is_not_submitted() {
        let mut repo = MockRepository::new();
        repo.expect_register_clinic().never();

        let mut form = registration_form();
        form.password_confirmation = "different".to_string();

        assert!(matches!(
            register_clinic(&repo, form).await,
            Err(ServiceError::Form(_))
        ));
    }

    /// Backend 422 field messages are passed through.
    #[tokio::test]
    async fn backend_validation_is_propagated() {
        let mut repo = MockRepository::new();
        repo.expect_register_clinic().returning(|_| {
            Err(RepositoryError::Validation {
                message: "invalid".to_string(),
                fields: [("email".to_string(), vec!["taken".to_string()])].into(),
            })
        });

        match register_clinic(&repo, registration_form()).await {
            Err(ServiceError::Validation { fields, .. }) => {
                assert_eq!(fields["email"], vec!["taken"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
