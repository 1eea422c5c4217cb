//! Daily billing report and its CSV export.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::CLINIC_MANAGER_ROLE;
use crate::domain::payment::Payment;
use crate::domain::types::Money;
use crate::dto::reports::{Breakdown, DailyReportData, ManagerDashboardData, PaymentSummary};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{PaymentReader, StaffReader};
use crate::services::staff::load_staff_page;
use crate::services::stats::{average, percent_change, share};
use crate::services::{ServiceError, ServiceResult, ensure_role, require_clinic};

/// Aggregates a day's payments.
pub fn summarize_payments(payments: &[Payment]) -> PaymentSummary {
    let total: Money = payments.iter().map(|p| p.amount).sum();

    PaymentSummary {
        total,
        count: payments.len(),
        average: average(total, payments.len()),
        by_method: breakdown(payments, total, |p| p.method.as_str().to_string()),
        by_doctor: breakdown(payments, total, |p| {
            p.doctor_name
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string())
        }),
    }
}

/// Groups by `key`, largest total first, ties by label.
fn breakdown<F>(payments: &[Payment], total: Money, key: F) -> Vec<Breakdown>
where
    F: Fn(&Payment) -> String,
{
    let mut groups: BTreeMap<String, (Money, usize)> = BTreeMap::new();
    for payment in payments {
        let entry = groups.entry(key(payment)).or_insert((Money::ZERO, 0));
        entry.0 = entry.0 + payment.amount;
        entry.1 += 1;
    }

    let mut rows: Vec<Breakdown> = groups
        .into_iter()
        .map(|(label, (amount, count))| Breakdown {
            label,
            total: amount,
            count,
            share_percent: share(amount, total),
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    rows
}

/// Loads the report for `date` and compares it with the previous day.
pub async fn load_daily_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    date: NaiveDate,
) -> ServiceResult<DailyReportData>
where
    R: PaymentReader + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let previous_date = date
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| ServiceError::Form("Date is out of range".to_string()))?;

    let current = repo.daily_payments(date).await.map_err(|err| {
        log::error!("Failed to load payments for {date}: {err}");
        ServiceError::from(err)
    })?;
    let previous = repo.daily_payments(previous_date).await.map_err(|err| {
        log::error!("Failed to load payments for {previous_date}: {err}");
        ServiceError::from(err)
    })?;

    let summary = summarize_payments(&current.payments);
    let previous_total: Money = previous.payments.iter().map(|p| p.amount).sum();

    Ok(DailyReportData {
        date,
        previous_date,
        change_percent: percent_change(
            summary.total.as_decimal(),
            previous_total.as_decimal(),
        ),
        previous_total,
        summary,
        payments: current.payments,
    })
}

/// Staff overview plus today's billing for the manager landing page.
pub async fn load_manager_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<ManagerDashboardData>
where
    R: StaffReader + PaymentReader + ?Sized,
{
    let staff = load_staff_page(repo, user).await?;
    let today = load_daily_report(repo, user, today).await?;

    Ok(ManagerDashboardData { staff, today })
}

/// Renders the day's payments as CSV.
pub async fn export_daily_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    date: NaiveDate,
) -> ServiceResult<Vec<u8>>
where
    R: PaymentReader + ?Sized,
{
    ensure_role(user, CLINIC_MANAGER_ROLE)?;
    require_clinic(user)?;

    let daily = repo.daily_payments(date).await.map_err(|err| {
        log::error!("Failed to load payments for export on {date}: {err}");
        ServiceError::from(err)
    })?;

    payments_to_csv(&daily.payments).map_err(|err| {
        log::error!("Failed to write payments CSV: {err}");
        ServiceError::Internal(err.to_string())
    })
}

fn payments_to_csv(payments: &[Payment]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "payment_id",
        "paid_at",
        "appointment_id",
        "patient",
        "doctor",
        "method",
        "amount",
    ])?;

    for payment in payments {
        writer.write_record([
            payment.id.to_string(),
            payment.paid_at.format("%Y-%m-%d %H:%M").to_string(),
            payment
                .appointment_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            payment.patient_name.clone().unwrap_or_default(),
            payment.doctor_name.clone().unwrap_or_default(),
            payment.method.as_str().to_string(),
            payment.amount.to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
