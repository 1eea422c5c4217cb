use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AppointmentId, Money, PaymentId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Insurance,
    Transfer,
    #[serde(untagged)]
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Insurance => "insurance",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other(s) => s,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub appointment_id: Option<AppointmentId>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub amount: Money,
    pub method: PaymentMethod,
    pub paid_at: NaiveDateTime,
}

/// Payments collected by a clinic on a single day.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DailyPayments {
    pub date: NaiveDate,
    pub payments: Vec<Payment>,
}

#[derive(Clone, Debug)]
pub struct NewPayment {
    pub appointment_id: AppointmentId,
    pub amount: Money,
    pub method: PaymentMethod,
}
