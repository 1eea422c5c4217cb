use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::payment::{DailyPayments, NewPayment, Payment, PaymentMethod};
use crate::domain::types::{AppointmentId, Money, PaymentId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPayment {
    pub id: i32,
    #[serde(default)]
    pub appointment_id: Option<i32>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(deserialize_with = "crate::models::datetime::deserialize")]
    pub paid_at: NaiveDateTime,
}

impl TryFrom<ApiPayment> for Payment {
    type Error = TypeConstraintError;

    fn try_from(payment: ApiPayment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentId::new(payment.id)?,
            appointment_id: payment.appointment_id.map(AppointmentId::new).transpose()?,
            patient_name: payment.patient_name,
            doctor_name: payment.doctor_name,
            amount: Money::from_decimal(payment.amount)?,
            method: payment.method,
            paid_at: payment.paid_at,
        })
    }
}

/// Response of `/clinic/payments/daily-report`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDailyReport {
    pub date: NaiveDate,
    #[serde(default)]
    pub payments: Vec<ApiPayment>,
}

impl TryFrom<ApiDailyReport> for DailyPayments {
    type Error = TypeConstraintError;

    fn try_from(report: ApiDailyReport) -> Result<Self, Self::Error> {
        Ok(Self {
            date: report.date,
            payments: report
                .payments
                .into_iter()
                .map(Payment::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Body of `POST /secretary/payments`.
#[derive(Debug, Serialize)]
pub struct ApiNewPayment<'a> {
    pub appointment_id: i32,
    pub amount: f64,
    pub method: &'a str,
}

impl<'a> From<&'a NewPayment> for ApiNewPayment<'a> {
    fn from(payment: &'a NewPayment) -> Self {
        Self {
            appointment_id: payment.appointment_id.get(),
            amount: payment.amount.as_decimal(),
            method: payment.method.as_str(),
        }
    }
}
