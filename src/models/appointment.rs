use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{Appointment, AppointmentStatus, NewAppointmentRequest};
use crate::domain::patient::PatientSummary;
use crate::domain::types::{AppointmentId, ClinicId, PatientId, StaffId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAppointment {
    pub id: i32,
    #[serde(default)]
    pub clinic_id: Option<i32>,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub patient_id: Option<i32>,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_id: Option<i32>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(deserialize_with = "crate::models::datetime::deserialize")]
    pub scheduled_at: NaiveDateTime,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<ApiAppointment> for Appointment {
    type Error = TypeConstraintError;

    fn try_from(appointment: ApiAppointment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentId::new(appointment.id)?,
            clinic_id: appointment.clinic_id.map(ClinicId::new).transpose()?,
            clinic_name: appointment.clinic_name,
            patient_id: appointment.patient_id.map(PatientId::new).transpose()?,
            patient_name: appointment.patient_name,
            doctor_id: appointment.doctor_id.map(StaffId::new).transpose()?,
            doctor_name: appointment.doctor_name,
            scheduled_at: appointment.scheduled_at,
            status: AppointmentStatus::from(appointment.status.as_str()),
            reason: appointment.reason,
            notes: appointment.notes,
        })
    }
}

/// Body of `POST /patient/appointments`.
#[derive(Debug, Serialize)]
pub struct ApiNewAppointment<'a> {
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub preferred_at: String,
    pub reason: &'a str,
}

impl<'a> From<&'a NewAppointmentRequest> for ApiNewAppointment<'a> {
    fn from(request: &'a NewAppointmentRequest) -> Self {
        Self {
            clinic_id: request.clinic_id.get(),
            doctor_id: request.doctor_id.get(),
            preferred_at: request.preferred_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            reason: request.reason.as_str(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPatient {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl TryFrom<ApiPatient> for PatientSummary {
    type Error = TypeConstraintError;

    fn try_from(patient: ApiPatient) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PatientId::new(patient.id)?,
            name: patient.name,
            phone: patient.phone,
            email: patient.email,
        })
    }
}
