use serde::Serialize;

use crate::domain::staff::StaffMember;

#[derive(Debug, Serialize)]
pub struct StaffPageData {
    pub doctors: Vec<StaffMember>,
    pub secretaries: Vec<StaffMember>,
    pub active_doctors: usize,
    pub active_secretaries: usize,
}
