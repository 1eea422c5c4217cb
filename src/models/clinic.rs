//! Backend JSON shapes for clinics and their conversion into domain records.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::clinic::{Clinic, ClinicSettings, ClinicStatus, NewClinicRegistration};
use crate::domain::types::{ClinicId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiClinic {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    pub status: String,
    #[serde(default, deserialize_with = "crate::models::datetime::deserialize_option")]
    pub created_at: Option<NaiveDateTime>,
}

impl TryFrom<ApiClinic> for Clinic {
    type Error = TypeConstraintError;

    fn try_from(clinic: ApiClinic) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClinicId::new(clinic.id)?,
            name: clinic.name,
            email: clinic.email,
            phone: clinic.phone.filter(|s| !s.is_empty()),
            address: clinic.address.filter(|s| !s.is_empty()),
            license_number: clinic.license_number,
            manager_name: clinic.manager_name,
            status: ClinicStatus::from(clinic.status.as_str()),
            created_at: clinic.created_at,
        })
    }
}

/// Paged envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    pub total: usize,
    pub items: Vec<T>,
}

/// Body of `POST /register/clinic`.
#[derive(Debug, Serialize)]
pub struct ApiClinicRegistration<'a> {
    pub clinic_name: &'a str,
    pub manager_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub address: Option<&'a str>,
    pub license_number: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a NewClinicRegistration> for ApiClinicRegistration<'a> {
    fn from(reg: &'a NewClinicRegistration) -> Self {
        Self {
            clinic_name: reg.clinic_name.as_str(),
            manager_name: reg.manager_name.as_str(),
            email: reg.email.as_str(),
            phone: reg.phone.as_str(),
            address: reg.address.as_deref(),
            license_number: reg.license_number.as_str(),
            password: &reg.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiClinicSettings {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_opening")]
    pub opening_time: String,
    #[serde(default = "default_closing")]
    pub closing_time: String,
    #[serde(default = "default_slot")]
    pub slot_minutes: u16,
    #[serde(default, skip_serializing)]
    pub logo_url: Option<String>,
}

fn default_opening() -> String {
    "09:00".to_string()
}

fn default_closing() -> String {
    "17:00".to_string()
}

fn default_slot() -> u16 {
    30
}

fn parse_time(value: &str) -> Result<NaiveTime, TypeConstraintError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| TypeConstraintError::InvalidValue(format!("time '{value}'")))
}

impl TryFrom<ApiClinicSettings> for ClinicSettings {
    type Error = TypeConstraintError;

    fn try_from(settings: ApiClinicSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            name: settings.name,
            phone: settings.phone,
            address: settings.address,
            opening_time: parse_time(&settings.opening_time)?,
            closing_time: parse_time(&settings.closing_time)?,
            slot_minutes: settings.slot_minutes,
            logo_url: settings.logo_url,
        })
    }
}

impl From<&ClinicSettings> for ApiClinicSettings {
    fn from(settings: &ClinicSettings) -> Self {
        Self {
            name: settings.name.clone(),
            phone: settings.phone.clone(),
            address: settings.address.clone(),
            opening_time: settings.opening_time.format("%H:%M").to_string(),
            closing_time: settings.closing_time.format("%H:%M").to_string(),
            slot_minutes: settings.slot_minutes,
            logo_url: None,
        }
    }
}
