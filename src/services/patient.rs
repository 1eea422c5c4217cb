//! Patient self-service: own appointments and booking requests.

use chrono::NaiveDateTime;

use crate::PATIENT_ROLE;
use crate::domain::appointment::{Appointment, NewAppointmentRequest};
use crate::domain::types::{AppointmentId, ClinicId};
use crate::dto::appointment_views;
use crate::dto::patient::{BookingPageData, PatientAppointmentsData};
use crate::forms::appointments::BookAppointmentForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AppointmentReader, AppointmentScope, AppointmentWriter, StaffReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Splits own appointments into upcoming (active, not yet started) and past.
pub async fn load_appointments<R>(
    repo: &R,
    user: &AuthenticatedUser,
    now: NaiveDateTime,
) -> ServiceResult<PatientAppointmentsData>
where
    R: AppointmentReader + ?Sized,
{
    ensure_role(user, PATIENT_ROLE)?;

    let appointments = repo
        .list_appointments(AppointmentScope::Patient)
        .await
        .map_err(|err| {
            log::error!("Failed to load patient appointments: {err}");
            ServiceError::from(err)
        })?;

    let (mut upcoming, mut past): (Vec<Appointment>, Vec<Appointment>) = appointments
        .into_iter()
        .partition(|a| a.status.is_active() && a.scheduled_at >= now);

    upcoming.sort_by_key(|a| a.scheduled_at);
    past.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));

    Ok(PatientAppointmentsData {
        upcoming: appointment_views(upcoming),
        past: appointment_views(past),
    })
}

/// Active doctors of the clinic a patient wants to book with.
pub async fn load_booking_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    clinic_id: i32,
) -> ServiceResult<BookingPageData>
where
    R: StaffReader + ?Sized,
{
    ensure_role(user, PATIENT_ROLE)?;

    let clinic = ClinicId::new(clinic_id)?;

    let mut doctors = repo.list_doctors(clinic).await.map_err(|err| {
        log::error!("Failed to load doctors of clinic {clinic}: {err}");
        ServiceError::from(err)
    })?;
    doctors.retain(|d| d.active);
    doctors.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(BookingPageData { clinic_id, doctors })
}

pub async fn book_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BookAppointmentForm,
    now: NaiveDateTime,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, PATIENT_ROLE)?;

    let request: NewAppointmentRequest = form.into_request(now)?;

    repo.request_appointment(&request).await.map_err(|err| {
        log::error!(
            "Failed to request appointment with doctor {}: {err}",
            request.doctor_id
        );
        ServiceError::from(err)
    })
}

pub async fn cancel_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, PATIENT_ROLE)?;

    let appointment_id = AppointmentId::new(appointment_id)?;

    repo.cancel_appointment(appointment_id).await.map_err(|err| {
        log::error!("Failed to cancel appointment {appointment_id}: {err}");
        ServiceError::from(err)
    })
}
