use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

use crate::domain::payment::{DailyPayments, NewPayment, Payment};
use crate::models::payment::{ApiDailyReport, ApiNewPayment, ApiPayment};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiSession, PaymentReader, PaymentWriter};

#[async_trait]
impl PaymentReader for ApiSession<'_> {
    async fn daily_payments(&self, date: NaiveDate) -> RepositoryResult<DailyPayments> {
        let report: ApiDailyReport = self
            .fetch(
                self.request(Method::GET, "/clinic/payments/daily-report")
                    .query(&[("date", date.format("%Y-%m-%d").to_string())]),
            )
            .await?;
        Ok(DailyPayments::try_from(report)?)
    }
}

#[async_trait]
impl PaymentWriter for ApiSession<'_> {
    async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment> {
        let created: ApiPayment = self
            .fetch(
                self.request(Method::POST, "/secretary/payments")
                    .json(&ApiNewPayment::from(payment)),
            )
            .await?;
        Ok(Payment::try_from(created)?)
    }
}
