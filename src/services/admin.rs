//! Platform administration: statistics and clinic approval workflow.

use crate::PLATFORM_ADMIN_ROLE;
use crate::domain::clinic::{Clinic, ClinicDecision, ClinicStatus};
use crate::domain::types::{ClinicId, Money};
use crate::dto::admin::{AdminDashboardData, ClinicsPageData};
use crate::forms::admin::{ClinicFilterQuery, RejectClinicForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ClinicListQuery, ClinicReader, ClinicWriter};
use crate::services::stats::{percent_change, ratio_percent};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads backend counters and derives the dashboard ratios.
pub async fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<AdminDashboardData>
where
    R: ClinicReader + ?Sized,
{
    ensure_role(user, PLATFORM_ADMIN_ROLE)?;

    let counters = repo.platform_counters().await.map_err(|err| {
        log::error!("Failed to load platform statistics: {err}");
        ServiceError::from(err)
    })?;

    let revenue_this_month = Money::from_decimal(counters.revenue_this_month)
        .map_err(|err| {
            log::warn!(
                "Ignoring monthly revenue {} reported by the backend: {err}",
                counters.revenue_this_month
            );
        })
        .ok();

    let decided = counters.approved_clinics + counters.rejected_clinics;
    let total_clinics = decided + counters.pending_clinics + counters.suspended_clinics;

    Ok(AdminDashboardData {
        total_clinics,
        approval_rate: ratio_percent(counters.approved_clinics, decided),
        registration_growth: percent_change(
            counters.registrations_this_month as f64,
            counters.registrations_last_month as f64,
        ),
        revenue_this_month,
        revenue_growth: percent_change(counters.revenue_this_month, counters.revenue_last_month),
        counters,
    })
}

/// Lists clinics, optionally filtered by status and a search term.
pub async fn list_clinics<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ClinicFilterQuery,
) -> ServiceResult<ClinicsPageData>
where
    R: ClinicReader + ?Sized,
{
    ensure_role(user, PLATFORM_ADMIN_ROLE)?;

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = ClinicListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let status_filter = query
        .status
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != "all");
    if let Some(status) = &status_filter {
        list_query = list_query.status(ClinicStatus::from(status.as_str()));
    }

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, clinics) = repo.list_clinics(list_query).await.map_err(|err| {
        log::error!("Failed to list clinics: {err}");
        ServiceError::from(err)
    })?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let page = page.min(total_pages.max(1));

    Ok(ClinicsPageData {
        clinics: Paginated::new(clinics, page, total_pages),
        total,
        status_filter,
        search_query,
    })
}

pub async fn approve_clinic<R>(
    repo: &R,
    user: &AuthenticatedUser,
    clinic_id: i32,
) -> ServiceResult<Clinic>
where
    R: ClinicWriter + ?Sized,
{
    ensure_role(user, PLATFORM_ADMIN_ROLE)?;
    decide(repo, clinic_id, ClinicDecision::Approve).await
}

/// Rejects a registration; a non-empty reason is required.
pub async fn reject_clinic<R>(
    repo: &R,
    user: &AuthenticatedUser,
    clinic_id: i32,
    form: RejectClinicForm,
) -> ServiceResult<Clinic>
where
    R: ClinicWriter + ?Sized,
{
    ensure_role(user, PLATFORM_ADMIN_ROLE)?;
    let decision = ClinicDecision::try_from(form)?;
    decide(repo, clinic_id, decision).await
}

pub async fn suspend_clinic<R>(
    repo: &R,
    user: &AuthenticatedUser,
    clinic_id: i32,
) -> ServiceResult<Clinic>
where
    R: ClinicWriter + ?Sized,
{
    ensure_role(user, PLATFORM_ADMIN_ROLE)?;
    decide(repo, clinic_id, ClinicDecision::Suspend).await
}

/// Sends a decision; callers check the admin role first.
async fn decide<R>(repo: &R, clinic_id: i32, decision: ClinicDecision) -> ServiceResult<Clinic>
where
    R: ClinicWriter + ?Sized,
{
    let clinic_id = ClinicId::new(clinic_id)?;

    repo.decide_clinic(clinic_id, &decision).await.map_err(|err| {
        log::error!("Failed to {} clinic {clinic_id}: {err}", decision.action());
        ServiceError::from(err)
    })
}
