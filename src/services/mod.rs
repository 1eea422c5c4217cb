//! Framework-agnostic workflows behind the HTTP routes.
//!
//! Every function takes the repository as a generic `&R` bound only by the
//! traits it needs, so handlers pass an [`crate::repository::ApiSession`] and
//! tests pass a `MockRepository`.

use crate::domain::types::ClinicId;
use crate::models::auth::AuthenticatedUser;

pub mod admin;
pub mod auth;
pub mod doctor;
pub mod errors;
pub mod lookup;
pub mod notifications;
pub mod patient;
pub mod reports;
pub mod secretary;
pub mod settings;
pub mod staff;
pub mod stats;

pub use errors::{ServiceError, ServiceResult};

pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    ensure_any_role(user, &[role])
}

pub fn ensure_any_role(user: &AuthenticatedUser, roles: &[&str]) -> ServiceResult<()> {
    if roles.iter().any(|role| user.has_role(role)) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Tenant of a clinic-bound user.
pub fn require_clinic(user: &AuthenticatedUser) -> ServiceResult<ClinicId> {
    let clinic_id = user.clinic_id.ok_or(ServiceError::Unauthorized)?;
    Ok(ClinicId::new(clinic_id)?)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::appointment::{Appointment, AppointmentStatus};
    use crate::domain::types::AppointmentId;
    use crate::models::auth::AuthenticatedUser;

    pub fn user_with(roles: &[&str], clinic_id: Option<i32>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "user@clinic.test".to_string(),
            name: "Test User".to_string(),
            clinic_id,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            token: "token".to_string(),
        }
    }

    pub fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    pub fn appointment(id: i32, scheduled_at: NaiveDateTime, status: &str) -> Appointment {
        Appointment {
            id: AppointmentId::new(id).unwrap(),
            clinic_id: None,
            clinic_name: None,
            patient_id: None,
            patient_name: format!("Patient {id}"),
            doctor_id: None,
            doctor_name: Some("Dr. Rivera".to_string()),
            scheduled_at,
            status: AppointmentStatus::from(status),
            reason: None,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::user_with;
    use super::*;

    #[test]
    fn any_listed_role_is_enough() {
        let user = user_with(&["doctor", "secretary"], Some(3));

        assert!(ensure_role(&user, "secretary").is_ok());
        assert!(ensure_any_role(&user, &["clinic_manager", "doctor"]).is_ok());
        assert!(matches!(
            ensure_role(&user, "platform_admin"),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn clinic_bound_users_need_a_tenant() {
        assert_eq!(
            require_clinic(&user_with(&["secretary"], Some(3))).unwrap(),
            ClinicId::new(3).unwrap()
        );
        assert!(matches!(
            require_clinic(&user_with(&["patient"], None)),
            Err(ServiceError::Unauthorized)
        ));
    }
}
