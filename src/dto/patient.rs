use serde::Serialize;

use crate::dto::AppointmentView;
use crate::domain::staff::StaffMember;

#[derive(Debug, Serialize)]
pub struct PatientAppointmentsData {
    pub upcoming: Vec<AppointmentView>,
    pub past: Vec<AppointmentView>,
}

#[derive(Debug, Serialize)]
pub struct BookingPageData {
    pub clinic_id: i32,
    pub doctors: Vec<StaffMember>,
}
