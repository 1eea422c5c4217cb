use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClinicId, ClinicName, EmailAddress, FreeText, LicenseNumber, PersonName, PhoneNumber,
};

/// Lifecycle state of a tenant as reported by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClinicStatus {
    Pending,
    Approved,
    Rejected,
    Suspended,
    #[serde(untagged)]
    Other(String),
}

impl ClinicStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClinicStatus::Pending => "pending",
            ClinicStatus::Approved => "approved",
            ClinicStatus::Rejected => "rejected",
            ClinicStatus::Suspended => "suspended",
            ClinicStatus::Other(s) => s,
        }
    }
}

impl From<&str> for ClinicStatus {
    fn from(s: &str) -> Self {
        match s {
            "pending" => ClinicStatus::Pending,
            "approved" => ClinicStatus::Approved,
            "rejected" => ClinicStatus::Rejected,
            "suspended" => ClinicStatus::Suspended,
            _ => ClinicStatus::Other(s.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub manager_name: Option<String>,
    pub status: ClinicStatus,
    pub created_at: Option<NaiveDateTime>,
}

/// Validated registration payload for a new tenant.
#[derive(Clone, Debug, Serialize)]
pub struct NewClinicRegistration {
    pub clinic_name: ClinicName,
    pub manager_name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub address: Option<String>,
    pub license_number: LicenseNumber,
    pub password: String,
}

/// Admin decision applied to a pending or active clinic.
#[derive(Clone, Debug, PartialEq)]
pub enum ClinicDecision {
    Approve,
    Reject(FreeText),
    Suspend,
}

impl ClinicDecision {
    /// Backend path segment for the decision endpoint.
    pub fn action(&self) -> &'static str {
        match self {
            ClinicDecision::Approve => "approve",
            ClinicDecision::Reject(_) => "reject",
            ClinicDecision::Suspend => "suspend",
        }
    }
}

/// Tenant profile editable by the clinic manager.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClinicSettings {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub slot_minutes: u16,
    pub logo_url: Option<String>,
}

/// Validated image forwarded to the backend as the clinic logo.
#[derive(Clone, Debug)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw platform counters reported by `/admin/dashboard/stats`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlatformCounters {
    #[serde(default)]
    pub pending_clinics: u64,
    #[serde(default)]
    pub approved_clinics: u64,
    #[serde(default)]
    pub rejected_clinics: u64,
    #[serde(default)]
    pub suspended_clinics: u64,
    #[serde(default)]
    pub registrations_this_month: u64,
    #[serde(default)]
    pub registrations_last_month: u64,
    #[serde(default)]
    pub revenue_this_month: f64,
    #[serde(default)]
    pub revenue_last_month: f64,
    #[serde(default)]
    pub active_users: u64,
}
