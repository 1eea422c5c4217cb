use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::staff::{NewDoctor, NewSecretary, StaffMember, StaffRole};
use crate::domain::types::{ClinicId, Money, StaffId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiStaffMember {
    pub id: i32,
    #[serde(default)]
    pub clinic_id: Option<i32>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub working_days: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Lower-case three letter code used by the backend for week days.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl TryFrom<ApiStaffMember> for StaffMember {
    type Error = TypeConstraintError;

    fn try_from(member: ApiStaffMember) -> Result<Self, Self::Error> {
        let working_days = member
            .working_days
            .iter()
            .map(|day| {
                day.parse::<Weekday>()
                    .map_err(|_| TypeConstraintError::InvalidValue(format!("week day '{day}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: StaffId::new(member.id)?,
            clinic_id: member.clinic_id.map(ClinicId::new).transpose()?,
            name: member.name,
            email: member.email,
            phone: member.phone,
            role: StaffRole::from(member.role.as_str()),
            specialty: member.specialty,
            consultation_fee: member.consultation_fee.map(Money::from_decimal).transpose()?,
            working_days,
            active: member.active,
        })
    }
}

/// Body of `POST /clinic/doctors`.
#[derive(Debug, Serialize)]
pub struct ApiNewDoctor<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub specialty: &'a str,
    pub consultation_fee: f64,
    pub working_days: Vec<&'static str>,
}

impl<'a> From<&'a NewDoctor> for ApiNewDoctor<'a> {
    fn from(doctor: &'a NewDoctor) -> Self {
        Self {
            name: doctor.name.as_str(),
            email: doctor.email.as_str(),
            phone: doctor.phone.as_str(),
            specialty: doctor.specialty.as_str(),
            consultation_fee: doctor.consultation_fee.as_decimal(),
            working_days: doctor.working_days.iter().copied().map(weekday_code).collect(),
        }
    }
}

/// Body of `POST /clinic/secretaries`.
#[derive(Debug, Serialize)]
pub struct ApiNewSecretary<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

impl<'a> From<&'a NewSecretary> for ApiNewSecretary<'a> {
    fn from(secretary: &'a NewSecretary) -> Self {
        Self {
            name: secretary.name.as_str(),
            email: secretary.email.as_str(),
            phone: secretary.phone.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_doctor_with_schedule() {
        let api: ApiStaffMember = serde_json::from_str(
            r#"{"id": 9, "clinic_id": 2, "name": "Dr. Lee", "email": "lee@clinic.test",
                "role": "doctor", "specialty": "Pediatrics", "consultation_fee": 40.5,
                "working_days": ["mon", "Wed", "friday"]}"#,
        )
        .unwrap();

        let member = StaffMember::try_from(api).unwrap();

        assert_eq!(member.role, StaffRole::Doctor);
        assert_eq!(member.consultation_fee, Some(Money::from_cents(4050)));
        assert_eq!(
            member.working_days,
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert!(member.active);
    }

    #[test]
    fn rejects_unknown_week_day() {
        let api: ApiStaffMember = serde_json::from_str(
            r#"{"id": 9, "name": "A", "email": "a@b.test", "role": "doctor", "working_days": ["someday"]}"#,
        )
        .unwrap();
        assert!(StaffMember::try_from(api).is_err());
    }
}
