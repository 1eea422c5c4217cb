//! Doctor schedule and visit outcomes.

use crate::DOCTOR_ROLE;
use crate::domain::appointment::{Appointment, AppointmentStatus, VisitOutcome};
use crate::domain::types::AppointmentId;
use crate::dto::appointment_views;
use crate::dto::doctor::DoctorScheduleData;
use crate::forms::appointments::CompleteVisitForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AppointmentReader, AppointmentScope, AppointmentWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, require_clinic};

pub async fn load_schedule<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<DoctorScheduleData>
where
    R: AppointmentReader + ?Sized,
{
    ensure_role(user, DOCTOR_ROLE)?;
    require_clinic(user)?;

    let mut today = repo
        .list_appointments(AppointmentScope::DoctorToday)
        .await
        .map_err(|err| {
            log::error!("Failed to load today's appointments: {err}");
            ServiceError::from(err)
        })?;
    let mut upcoming = repo
        .list_appointments(AppointmentScope::DoctorUpcoming)
        .await
        .map_err(|err| {
            log::error!("Failed to load upcoming appointments: {err}");
            ServiceError::from(err)
        })?;

    today.sort_by_key(|a| a.scheduled_at);
    upcoming.sort_by_key(|a| a.scheduled_at);

    Ok(DoctorScheduleData {
        remaining_today: today.iter().filter(|a| a.status.is_active()).count(),
        completed_today: today
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count(),
        today: appointment_views(today),
        upcoming: appointment_views(upcoming),
    })
}

async fn record_visit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    outcome: VisitOutcome,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, DOCTOR_ROLE)?;
    require_clinic(user)?;

    let appointment_id = AppointmentId::new(appointment_id)?;

    repo.record_visit(appointment_id, &outcome)
        .await
        .map_err(|err| {
            log::error!("Failed to record visit outcome for {appointment_id}: {err}");
            ServiceError::from(err)
        })
}

/// Marks the visit completed with optional sanitized notes.
pub async fn complete_visit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
    form: CompleteVisitForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    ensure_role(user, DOCTOR_ROLE)?;
    let outcome = VisitOutcome::try_from(form)?;
    record_visit(repo, user, appointment_id, outcome).await
}

pub async fn mark_no_show<R>(
    repo: &R,
    user: &AuthenticatedUser,
    appointment_id: i32,
) -> ServiceResult<Appointment>
where
    R: AppointmentWriter + ?Sized,
{
    record_visit(repo, user, appointment_id, VisitOutcome::NoShow).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FreeText;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{appointment, at, user_with};

    fn doctor() -> AuthenticatedUser {
        user_with(&["doctor"], Some(2))
    }

    /// Today's list is ordered and counted by status.
    #[tokio::test]
    async fn schedule_counts_remaining_and_completed() {
        let mut repo = MockRepository::new();
        repo.expect_list_appointments()
            .withf(|scope| *scope == AppointmentScope::DoctorToday)
            .returning(|_| {
                Ok(vec![
                    appointment(2, at(10, 15), "approved"),
                    appointment(1, at(10, 9), "completed"),
                    appointment(3, at(10, 16), "no_show"),
                ])
            });
        repo.expect_list_appointments()
            .withf(|scope| *scope == AppointmentScope::DoctorUpcoming)
            .returning(|_| Ok(vec![appointment(4, at(11, 9), "approved")]));

        let data = load_schedule(&repo, &doctor()).await.unwrap();

        assert_eq!(data.today[0].appointment.id.get(), 1);
        assert_eq!(data.remaining_today, 1);
        assert_eq!(data.completed_today, 1);
        assert_eq!(data.upcoming.len(), 1);
    }

    /// Notes are sanitized before they are sent.
    #[tokio::test]
    async fn complete_sends_sanitized_notes() {
        let mut repo = MockRepository::new();
        repo.expect_record_visit()
            .withf(|_, outcome| {
                *outcome
                    == VisitOutcome::Completed {
                        notes: Some(FreeText::new("Rest for two days").unwrap()),
                    }
            })
            .returning(|_, _| Ok(appointment(1, at(10, 9), "completed")));

        let form = CompleteVisitForm {
            notes: "<script>x</script>Rest for two days".to_string(),
        };
        let updated = complete_visit(&repo, &doctor(), 1, form).await.unwrap();

        assert_eq!(updated.status, AppointmentStatus::Completed);
    }

    /// Only doctors record outcomes.
    #[tokio::test]
    async fn secretaries_cannot_mark_no_show() {
        let mut repo = MockRepository::new();
        repo.expect_record_visit().never();

        let result = mark_no_show(&repo, &user_with(&["secretary"], Some(2)), 1).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
