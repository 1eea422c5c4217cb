//! Clinic manager staff administration.

use crate::CLINIC_MANAGER_ROLE;
use crate::domain::staff::{NewDoctor, NewSecretary, StaffMember, StaffRole};
use crate::domain::types::StaffId;
use crate::dto::staff::StaffPageData;
use crate::forms::staff::{AddDoctorForm, AddSecretaryForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{StaffReader, StaffWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, require_clinic};

/// Lists clinic staff grouped into doctors and secretaries.
pub async fn load_staff_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<StaffPageData>
where
    R: StaffReader + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let staff = repo.list_staff().await.map_err(|err| {
        log::error!("Failed to list staff: {err}");
        ServiceError::from(err)
    })?;

    Ok(group_staff(staff))
}

fn group_staff(staff: Vec<StaffMember>) -> StaffPageData {
    let (mut doctors, mut secretaries): (Vec<_>, Vec<_>) = staff
        .into_iter()
        .filter(|member| matches!(member.role, StaffRole::Doctor | StaffRole::Secretary))
        .partition(|member| member.role == StaffRole::Doctor);

    doctors.sort_by(|a, b| a.name.cmp(&b.name));
    secretaries.sort_by(|a, b| a.name.cmp(&b.name));

    StaffPageData {
        active_doctors: doctors.iter().filter(|m| m.active).count(),
        active_secretaries: secretaries.iter().filter(|m| m.active).count(),
        doctors,
        secretaries,
    }
}

pub async fn add_doctor<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddDoctorForm,
) -> ServiceResult<StaffMember>
where
    R: StaffWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let doctor = NewDoctor::try_from(form)?;

    repo.create_doctor(&doctor).await.map_err(|err| {
        log::error!("Failed to add doctor {}: {err}", doctor.email);
        ServiceError::from(err)
    })
}

pub async fn add_secretary<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddSecretaryForm,
) -> ServiceResult<StaffMember>
where
    R: StaffWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let secretary = NewSecretary::try_from(form)?;

    repo.create_secretary(&secretary).await.map_err(|err| {
        log::error!("Failed to add secretary {}: {err}", secretary.email);
        ServiceError::from(err)
    })
}

/// Activates or deactivates a staff member; returns the stored state.
pub async fn set_staff_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    staff_id: i32,
    active: bool,
) -> ServiceResult<StaffMember>
where
    R: StaffWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let staff_id = StaffId::new(staff_id)?;

    repo.set_staff_active(staff_id, active).await.map_err(|err| {
        log::error!("Failed to change status of staff member {staff_id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn remove_staff<R>(repo: &R, user: &AuthenticatedUser, staff_id: i32) -> ServiceResult<()>
where
    R: StaffWriter + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let staff_id = StaffId::new(staff_id)?;

    repo.remove_staff(staff_id).await.map_err(|err| {
        log::error!("Failed to remove staff member {staff_id}: {err}");
        ServiceError::from(err)
    })
}
