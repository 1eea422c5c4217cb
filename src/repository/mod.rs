//! Reader/writer traits over the clinic backend and their HTTP implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::appointment::{Appointment, NewAppointmentRequest, TriageDecision, VisitOutcome};
use crate::domain::clinic::{
    Clinic, ClinicDecision, ClinicSettings, ClinicStatus, LogoUpload, NewClinicRegistration,
    PlatformCounters,
};
use crate::domain::notification::Notification;
use crate::domain::patient::PatientSummary;
use crate::domain::payment::{DailyPayments, NewPayment, Payment};
use crate::domain::staff::{NewDoctor, NewSecretary, StaffMember};
use crate::domain::types::{AppointmentId, ClinicId, NotificationId, StaffId};
use crate::repository::errors::RepositoryResult;

pub mod account;
pub mod api;
pub mod appointment;
pub mod clinic;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod notification;
pub mod payment;
pub mod staff;

pub use api::{ApiRepository, ApiSession};

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicListQuery {
    pub status: Option<ClinicStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClinicListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ClinicStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Which appointment listing to fetch; each maps to one backend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentScope {
    /// Requests awaiting triage by reception.
    PendingRequests,
    /// Every appointment of the clinic on a given day.
    ClinicDay(NaiveDate),
    DoctorToday,
    DoctorUpcoming,
    /// Appointments of the authenticated patient.
    Patient,
}

#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn register_clinic(&self, registration: &NewClinicRegistration)
    -> RepositoryResult<Clinic>;
    /// Exchanges credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> RepositoryResult<String>;
}

#[async_trait]
pub trait ClinicReader: Send + Sync {
    async fn list_clinics(&self, query: ClinicListQuery) -> RepositoryResult<(usize, Vec<Clinic>)>;
    async fn platform_counters(&self) -> RepositoryResult<PlatformCounters>;
}

#[async_trait]
pub trait ClinicWriter: Send + Sync {
    async fn decide_clinic(&self, id: ClinicId, decision: &ClinicDecision)
    -> RepositoryResult<Clinic>;
}

#[async_trait]
pub trait SettingsReader: Send + Sync {
    async fn get_settings(&self) -> RepositoryResult<ClinicSettings>;
}

#[async_trait]
pub trait SettingsWriter: Send + Sync {
    async fn update_settings(&self, settings: &ClinicSettings) -> RepositoryResult<ClinicSettings>;
    async fn upload_logo(&self, logo: &LogoUpload) -> RepositoryResult<()>;
}

#[async_trait]
pub trait StaffReader: Send + Sync {
    async fn list_staff(&self) -> RepositoryResult<Vec<StaffMember>>;
    async fn list_doctors(&self, clinic_id: ClinicId) -> RepositoryResult<Vec<StaffMember>>;
}

#[async_trait]
pub trait StaffWriter: Send + Sync {
    async fn create_doctor(&self, doctor: &NewDoctor) -> RepositoryResult<StaffMember>;
    async fn create_secretary(&self, secretary: &NewSecretary) -> RepositoryResult<StaffMember>;
    async fn set_staff_active(&self, id: StaffId, active: bool) -> RepositoryResult<StaffMember>;
    async fn remove_staff(&self, id: StaffId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AppointmentReader: Send + Sync {
    async fn list_appointments(&self, scope: AppointmentScope)
    -> RepositoryResult<Vec<Appointment>>;
}

#[async_trait]
pub trait AppointmentWriter: Send + Sync {
    async fn triage_appointment(
        &self,
        id: AppointmentId,
        decision: &TriageDecision,
    ) -> RepositoryResult<Appointment>;
    async fn record_visit(
        &self,
        id: AppointmentId,
        outcome: &VisitOutcome,
    ) -> RepositoryResult<Appointment>;
    async fn request_appointment(
        &self,
        request: &NewAppointmentRequest,
    ) -> RepositoryResult<Appointment>;
    async fn cancel_appointment(&self, id: AppointmentId) -> RepositoryResult<Appointment>;
}

#[async_trait]
pub trait PatientReader: Send + Sync {
    async fn search_patients(&self, term: &str) -> RepositoryResult<Vec<PatientSummary>>;
}

#[async_trait]
pub trait PaymentReader: Send + Sync {
    async fn daily_payments(&self, date: NaiveDate) -> RepositoryResult<DailyPayments>;
}

#[async_trait]
pub trait PaymentWriter: Send + Sync {
    async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment>;
}

#[async_trait]
pub trait NotificationReader: Send + Sync {
    async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>>;
}

#[async_trait]
pub trait NotificationWriter: Send + Sync {
    async fn mark_notification_read(&self, id: NotificationId) -> RepositoryResult<()>;
    async fn mark_all_notifications_read(&self) -> RepositoryResult<()>;
}
