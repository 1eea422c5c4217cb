use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClinicId, EmailAddress, Money, PersonName, PhoneNumber, Specialty, StaffId,
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Manager,
    Doctor,
    Secretary,
    #[serde(untagged)]
    Other(String),
}

impl From<&str> for StaffRole {
    fn from(s: &str) -> Self {
        match s {
            "manager" => StaffRole::Manager,
            "doctor" => StaffRole::Doctor,
            "secretary" => StaffRole::Secretary,
            _ => StaffRole::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StaffMember {
    pub id: StaffId,
    pub clinic_id: Option<ClinicId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub specialty: Option<String>,
    pub consultation_fee: Option<Money>,
    pub working_days: Vec<Weekday>,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct NewDoctor {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub specialty: Specialty,
    pub consultation_fee: Money,
    pub working_days: Vec<Weekday>,
}

#[derive(Clone, Debug)]
pub struct NewSecretary {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}
