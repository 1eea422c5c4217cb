//! Forms used by reception, doctors and patients to act on appointments.

use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::{NewAppointmentRequest, TriageDecision, VisitOutcome};
use crate::domain::payment::{NewPayment, PaymentMethod};
use crate::domain::types::{AppointmentId, ClinicId, FreeText, Money, StaffId};
use crate::forms::FormError;
use crate::models::datetime::parse_timestamp;

fn parse_future(value: &str, now: NaiveDateTime) -> Result<NaiveDateTime, FormError> {
    let parsed = parse_timestamp(value).ok_or(FormError::InvalidDateTime)?;
    if parsed <= now {
        return Err(FormError::DateInPast);
    }
    Ok(parsed)
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectAppointmentForm {
    #[validate(length(max = 500))]
    #[serde(default)]
    pub reason: String,
}

impl TryFrom<RejectAppointmentForm> for TriageDecision {
    type Error = FormError;

    fn try_from(form: RejectAppointmentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let reason = FreeText::new(form.reason).map_err(|_| FormError::MissingReason)?;
        Ok(TriageDecision::Reject { reason })
    }
}

#[derive(Debug, Deserialize)]
pub struct RescheduleAppointmentForm {
    /// `datetime-local` input value.
    pub scheduled_at: String,
}

impl RescheduleAppointmentForm {
    pub fn into_decision(self, now: NaiveDateTime) -> Result<TriageDecision, FormError> {
        let scheduled_at = parse_future(&self.scheduled_at, now)?;
        Ok(TriageDecision::Reschedule { scheduled_at })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteVisitForm {
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<CompleteVisitForm> for VisitOutcome {
    type Error = FormError;

    fn try_from(form: CompleteVisitForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(VisitOutcome::Completed {
            notes: FreeText::new(form.notes).ok(),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookAppointmentForm {
    pub clinic_id: i32,
    pub doctor_id: i32,
    pub preferred_at: String,
    #[validate(length(min = 3, max = 500))]
    pub reason: String,
}

impl BookAppointmentForm {
    pub fn into_request(self, now: NaiveDateTime) -> Result<NewAppointmentRequest, FormError> {
        self.validate()?;

        Ok(NewAppointmentRequest {
            clinic_id: ClinicId::new(self.clinic_id)?,
            doctor_id: StaffId::new(self.doctor_id)?,
            preferred_at: parse_future(&self.preferred_at, now)?,
            reason: FreeText::new(self.reason).map_err(|_| FormError::MissingReason)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentForm {
    pub appointment_id: i32,
    pub amount: f64,
    pub method: String,
}

impl TryFrom<RecordPaymentForm> for NewPayment {
    type Error = FormError;

    fn try_from(form: RecordPaymentForm) -> Result<Self, Self::Error> {
        let amount = Money::from_decimal(form.amount)?;
        if amount == Money::ZERO {
            return Err(FormError::InvalidAmount);
        }

        let method = match form.method.trim() {
            "cash" => PaymentMethod::Cash,
            "card" => PaymentMethod::Card,
            "insurance" => PaymentMethod::Insurance,
            "transfer" => PaymentMethod::Transfer,
            _ => return Err(FormError::InvalidPaymentMethod),
        };

        Ok(Self {
            appointment_id: AppointmentId::new(form.appointment_id)?,
            amount,
            method,
        })
    }
}
