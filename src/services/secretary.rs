//! Reception workflows: daily board, request triage and payments.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::appointment::{Appointment, AppointmentStatus, TriageDecision};
use crate::domain::payment::{NewPayment, Payment};
use crate::domain::types::{AppointmentId, Money};
use crate::dto::appointment_views;
use crate::dto::secretary::{RequestsPageData, SecretaryDashboardData, StatusCount};
use crate::forms::appointments::{
    RecordPaymentForm, RejectAppointmentForm, RescheduleAppointmentForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    AppointmentReader, AppointmentScope, AppointmentWriter, PaymentReader, PaymentWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_any_role, require_clinic};
use crate::{CLINIC_MANAGER_ROLE, SECRETARY_ROLE};

const RECEPTION_ROLES: [&str; 2] = [SECRETARY_ROLE, CLINIC_MANAGER_ROLE];

const STATUS_ORDER: [AppointmentStatus; 7] = [
    AppointmentStatus::Pending,
    AppointmentStatus::Approved,
    AppointmentStatus::Rescheduled,
    AppointmentStatus::Completed,
    AppointmentStatus::NoShow,
    AppointmentStatus::Cancelled,
    AppointmentStatus::Rejected,
];

fn ensure_reception(user: &AuthenticatedUser) -> ServiceResult<()> {
    ensure_any_role(user, &RECEPTION_ROLES)?;
    require_clinic(user)?;
    Ok(())
}

/// Counts per status in a fixed order; unknown statuses follow alphabetically.
pub fn count_by_status(appointments: &[Appointment]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = STATUS_ORDER
        .iter()
        .map(|status| StatusCount {
            status: status.as_str().to_string(),
            count: appointments.iter().filter(|a| &a.status == status).count(),
        })
        .collect();

    let mut others: Vec<&str> = appointments
        .iter()
        .filter_map(|a| match &a.status {
            AppointmentStatus::Other(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    others.sort_unstable();
    others.dedup();

    counts.extend(others.into_iter().map(|status| StatusCount {
        status: status.to_string(),
        count: appointments
            .iter()
            .filter(|a| a.status.as_str() == status)
            .count(),
    }));
    counts
}

/// Appointments of `date` with status counts, pending requests and takings.
pub async fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    date: NaiveDate,
) -> ServiceResult<SecretaryDashboardData>
where
    R: AppointmentReader + PaymentReader + ?Sized,
{
    ensure_reception(user)?;

    let mut appointments = repo
        .list_appointments(AppointmentScope::ClinicDay(date))
        .await
        .map_err(|err| {
            log::error!("Failed to load appointments for {date}: {err}");
            ServiceError::from(err)
        })?;
    appointments.sort_by_key(|a| a.scheduled_at);

    let pending = repo
        .list_appointments(AppointmentScope::PendingRequests)
        .await
        .map_err(|err| {
            log::error!("Failed to load pending requests: {err}");
            ServiceError::from(err)
        })?;

    let collected_today = match repo.daily_payments(date).await {
        Ok(daily) => Some(daily.payments.iter().map(|p| p.amount).sum::<Money>()),
        Err(RepositoryError::Forbidden(_)) => None,
        Err(err) => {
            log::error!("Failed to load payments for {date}: {err}");
            return Err(ServiceError::from(err));
        }
    };

    Ok(SecretaryDashboardData {
        date,
        status_counts: count_by_status(&appointments),
        appointments: appointment_views(appointments),
        pending_requests: pending.len(),
        collected_today,
    })
}

pub async fn list_requests<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<RequestsPageData>
where
    R: AppointmentReader + ?Sized,
{
    ensure_reception(user)?;

    let mut requests = repo
        .list_appointments(AppointmentScope::PendingRequests)
        .await
        .map_err(|err| {
            log::error!("Failed to load pending requests: {err}");
            ServiceError::from(err)
        })?;
    requests.sort_by_key(|a| a.scheduled_at);

    Ok(RequestsPageData {
        requests: appointment_views(requests),
    })
}

/// Sends a triage decision; callers check the reception role first.
async fn triage<R>(
    repo: &R,
    appointment_id: i32,
    decision: TriageDecision,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    let appointment_id = AppointmentId::new(appointment_id)?;

    repo.triage_appointment(appointment_id, &decision)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to {} appointment {appointment_id}: {err}",
                decision.action()
            );
            ServiceError::from(err)
        })
}

/// Approves a request; the returned appointment carries the server status.
pub async fn approve_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_reception(user)?;
    triage(repo, appointment_id, TriageDecision::Approve).await
}

pub async fn reject_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: RejectAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_reception(user)?;
    let decision = TriageDecision::try_from(form)?;
    triage(repo, appointment_id, decision).await
}

pub async fn reschedule_appointment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: RescheduleAppointmentForm,
    now: NaiveDateTime,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_reception(user)?;
    let decision = form.into_decision(now)?;
    triage(repo, appointment_id, decision).await
}

pub async fn record_payment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordPaymentForm,
) -> ServiceResult<Payment>
where
    R: PaymentWriter + ?Sized,
{
    ensure_reception(user)?;

    let payment = NewPayment::try_from(form)?;

    repo.record_payment(&payment).await.map_err(|err| {
        log::error!(
            "Failed to record payment for appointment {}: {err}",
            payment.appointment_id
        );
        ServiceError::from(err)
    })
}
