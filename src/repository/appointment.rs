use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use crate::domain::appointment::{
    Appointment, NewAppointmentRequest, TriageDecision, VisitOutcome,
};
use crate::domain::patient::PatientSummary;
use crate::domain::types::AppointmentId;
use crate::models::appointment::{ApiAppointment, ApiNewAppointment, ApiPatient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApiSession, AppointmentReader, AppointmentScope, AppointmentWriter, PatientReader,
};

impl ApiSession<'_> {
    async fn appointment_action(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> RepositoryResult<Appointment> {
        let mut request = self.request(Method::POST, path);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let appointment: ApiAppointment = self.fetch(request).await?;
        Ok(Appointment::try_from(appointment)?)
    }
}

#[async_trait]
impl AppointmentReader for ApiSession<'_> {
    async fn list_appointments(
        &self,
        scope: AppointmentScope,
    ) -> RepositoryResult<Vec<Appointment>> {
        let request = match scope {
            AppointmentScope::PendingRequests => {
                self.request(Method::GET, "/secretary/appointments/pending")
            }
            AppointmentScope::ClinicDay(date) => self
                .request(Method::GET, "/secretary/dashboard/appointments")
                .query(&[("date", date.format("%Y-%m-%d").to_string())]),
            AppointmentScope::DoctorToday => self.request(Method::GET, "/doctor/appointments/today"),
            AppointmentScope::DoctorUpcoming => {
                self.request(Method::GET, "/doctor/appointments/upcoming")
            }
            AppointmentScope::Patient => self.request(Method::GET, "/patient/appointments"),
        };

        let appointments: Vec<ApiAppointment> = self.fetch(request).await?;
        Ok(appointments
            .into_iter()
            .map(Appointment::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

#[async_trait]
impl AppointmentWriter for ApiSession<'_> {
    async fn triage_appointment(
        &self,
        id: AppointmentId,
        decision: &TriageDecision,
    ) -> RepositoryResult<Appointment> {
        let body = match decision {
            TriageDecision::Approve => None,
            TriageDecision::Reject { reason } => Some(json!({ "reason": reason.as_str() })),
            TriageDecision::Reschedule { scheduled_at } => Some(json!({
                "scheduled_at": scheduled_at.format("%Y-%m-%dT%H:%M:%S").to_string()
            })),
        };
        let path = format!("/secretary/appointments/{id}/{}", decision.action());
        self.appointment_action(&path, body).await
    }

    async fn record_visit(
        &self,
        id: AppointmentId,
        outcome: &VisitOutcome,
    ) -> RepositoryResult<Appointment> {
        match outcome {
            VisitOutcome::Completed { notes } => {
                let body = json!({ "notes": notes.as_ref().map(|n| n.as_str()) });
                self.appointment_action(&format!("/doctor/appointments/{id}/complete"), Some(body))
                    .await
            }
            VisitOutcome::NoShow => {
                self.appointment_action(&format!("/doctor/appointments/{id}/no-show"), None)
                    .await
            }
        }
    }

    async fn request_appointment(
        &self,
        request: &NewAppointmentRequest,
    ) -> RepositoryResult<Appointment> {
        let appointment: ApiAppointment = self
            .fetch(
                self.request(Method::POST, "/patient/appointments")
                    .json(&ApiNewAppointment::from(request)),
            )
            .await?;
        Ok(Appointment::try_from(appointment)?)
    }

    async fn cancel_appointment(&self, id: AppointmentId) -> RepositoryResult<Appointment> {
        self.appointment_action(&format!("/patient/appointments/{id}/cancel"), None)
            .await
    }
}

#[async_trait]
impl PatientReader for ApiSession<'_> {
    async fn search_patients(&self, term: &str) -> RepositoryResult<Vec<PatientSummary>> {
        let patients: Vec<ApiPatient> = self
            .fetch(
                self.request(Method::GET, "/secretary/patients/search")
                    .query(&[("q", term)]),
            )
            .await?;
        Ok(patients
            .into_iter()
            .map(PatientSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
