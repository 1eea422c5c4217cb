use chrono::NaiveDate;
use serde::Serialize;

use crate::dto::AppointmentView;
use crate::domain::types::Money;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SecretaryDashboardData {
    pub date: NaiveDate,
    pub appointments: Vec<AppointmentView>,
    pub status_counts: Vec<StatusCount>,
    pub pending_requests: usize,
    /// `None` when the backend does not expose payments to this user.
    pub collected_today: Option<Money>,
}

#[derive(Debug, Serialize)]
pub struct RequestsPageData {
    pub requests: Vec<AppointmentView>,
}
