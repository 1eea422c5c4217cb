//! DTOs for billing reports.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::payment::Payment;
use crate::domain::types::Money;
use crate::dto::staff::StaffPageData;

/// Totals for one grouping key (payment method or doctor).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Breakdown {
    pub label: String,
    pub total: Money,
    pub count: usize,
    pub share_percent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentSummary {
    pub total: Money,
    pub count: usize,
    pub average: Money,
    pub by_method: Vec<Breakdown>,
    pub by_doctor: Vec<Breakdown>,
}

#[derive(Debug, Serialize)]
pub struct DailyReportData {
    pub date: NaiveDate,
    pub previous_date: NaiveDate,
    pub payments: Vec<Payment>,
    pub summary: PaymentSummary,
    pub previous_total: Money,
    /// Change of the day's total against the previous day, in percent.
    pub change_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ManagerDashboardData {
    pub staff: StaffPageData,
    pub today: DailyReportData,
}
