use serde::Serialize;

use crate::dto::AppointmentView;

#[derive(Debug, Serialize)]
pub struct DoctorScheduleData {
    pub today: Vec<AppointmentView>,
    pub upcoming: Vec<AppointmentView>,
    pub remaining_today: usize,
    pub completed_today: usize,
}
