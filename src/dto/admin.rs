//! DTOs used in platform administration pages.

use serde::Serialize;

use crate::domain::clinic::{Clinic, PlatformCounters};
use crate::domain::types::Money;
use crate::pagination::Paginated;

/// Platform overview: raw counters plus derived ratios.
#[derive(Debug, Serialize)]
pub struct AdminDashboardData {
    pub counters: PlatformCounters,
    pub total_clinics: u64,
    /// Share of decided registrations that were approved.
    pub approval_rate: Option<f64>,
    pub registration_growth: Option<f64>,
    pub revenue_this_month: Option<Money>,
    pub revenue_growth: Option<f64>,
}

pub struct ClinicsPageData {
    pub clinics: Paginated<Clinic>,
    pub total: usize,
    pub status_filter: Option<String>,
    pub search_query: Option<String>,
}
