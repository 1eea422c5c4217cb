use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AppointmentId, ClinicId, FreeText, PatientId, StaffId};

/// Appointment state as last reported by the backend.
///
/// Transitions are decided server-side; this type only mirrors them and
/// derives which buttons a page should offer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
    Rescheduled,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    NoShow,
    #[serde(untagged)]
    Other(String),
}

/// Actions a page can offer for an appointment in a given status.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    Approve,
    Reject,
    Reschedule,
    Complete,
    NoShow,
    Cancel,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Rescheduled => "rescheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
            AppointmentStatus::Other(s) => s,
        }
    }

    /// Whether the appointment still occupies a slot in the schedule.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Pending
                | AppointmentStatus::Approved
                | AppointmentStatus::Rescheduled
        )
    }

    pub fn available_actions(&self) -> &'static [AppointmentAction] {
        use AppointmentAction::*;
        match self {
            AppointmentStatus::Pending => &[Approve, Reject, Reschedule],
            AppointmentStatus::Approved | AppointmentStatus::Rescheduled => {
                &[Reschedule, Complete, NoShow, Cancel]
            }
            _ => &[],
        }
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => AppointmentStatus::Pending,
            "approved" => AppointmentStatus::Approved,
            "rejected" => AppointmentStatus::Rejected,
            "rescheduled" => AppointmentStatus::Rescheduled,
            "completed" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            "no_show" => AppointmentStatus::NoShow,
            _ => AppointmentStatus::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub clinic_id: Option<ClinicId>,
    pub clinic_name: Option<String>,
    pub patient_id: Option<PatientId>,
    pub patient_name: String,
    pub doctor_id: Option<StaffId>,
    pub doctor_name: Option<String>,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn actions(&self) -> &'static [AppointmentAction] {
        self.status.available_actions()
    }
}

/// Booking request submitted by a patient.
#[derive(Clone, Debug)]
pub struct NewAppointmentRequest {
    pub clinic_id: ClinicId,
    pub doctor_id: StaffId,
    pub preferred_at: NaiveDateTime,
    pub reason: FreeText,
}

/// Staff triage decision on an appointment request.
#[derive(Clone, Debug, PartialEq)]
pub enum TriageDecision {
    Approve,
    Reject { reason: FreeText },
    Reschedule { scheduled_at: NaiveDateTime },
}

impl TriageDecision {
    pub fn action(&self) -> &'static str {
        match self {
            TriageDecision::Approve => "approve",
            TriageDecision::Reject { .. } => "reject",
            TriageDecision::Reschedule { .. } => "reschedule",
        }
    }
}

/// Doctor-side outcome of a visit.
#[derive(Clone, Debug, PartialEq)]
pub enum VisitOutcome {
    Completed { notes: Option<FreeText> },
    NoShow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_cancel_spellings_parse_alike() {
        let parsed: AppointmentStatus = serde_json::from_str("\"canceled\"").unwrap();

        assert_eq!(parsed, AppointmentStatus::Cancelled);
        assert_eq!(AppointmentStatus::from("canceled"), parsed);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: AppointmentStatus = serde_json::from_str("\"waitlisted\"").unwrap();
        assert_eq!(status, AppointmentStatus::Other("waitlisted".to_string()));
        assert_eq!(status.as_str(), "waitlisted");
        assert!(status.available_actions().is_empty());
    }

    #[test]
    fn known_statuses_parse_from_snake_case() {
        let status: AppointmentStatus = serde_json::from_str("\"no_show\"").unwrap();
        assert_eq!(status, AppointmentStatus::NoShow);
        assert_eq!(AppointmentStatus::from("canceled"), AppointmentStatus::Cancelled);
    }

    #[test]
    fn pending_requests_offer_triage_actions() {
        assert_eq!(
            AppointmentStatus::Pending.available_actions(),
            &[
                AppointmentAction::Approve,
                AppointmentAction::Reject,
                AppointmentAction::Reschedule
            ]
        );
        assert!(AppointmentStatus::Approved.is_active());
        assert!(!AppointmentStatus::Completed.is_active());
    }
}
