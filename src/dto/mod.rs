//! DTO modules that bridge services with templates and APIs.

use serde::Serialize;

use crate::domain::appointment::{Appointment, AppointmentAction};

pub mod admin;
pub mod doctor;
pub mod notifications;
pub mod patient;
pub mod reports;
pub mod secretary;
pub mod staff;

/// Appointment together with the buttons its status allows.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub actions: &'static [AppointmentAction],
}

impl From<Appointment> for AppointmentView {
    fn from(appointment: Appointment) -> Self {
        Self {
            actions: appointment.actions(),
            appointment,
        }
    }
}

pub fn appointment_views(appointments: Vec<Appointment>) -> Vec<AppointmentView> {
    appointments.into_iter().map(AppointmentView::from).collect()
}
