//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use crate::domain::appointment::{Appointment, NewAppointmentRequest, TriageDecision, VisitOutcome};
use crate::domain::clinic::{
    Clinic, ClinicDecision, ClinicSettings, LogoUpload, NewClinicRegistration, PlatformCounters,
};
use crate::domain::notification::Notification;
use crate::domain::patient::PatientSummary;
use crate::domain::payment::{DailyPayments, NewPayment, Payment};
use crate::domain::staff::{NewDoctor, NewSecretary, StaffMember};
use crate::domain::types::{AppointmentId, ClinicId, NotificationId, StaffId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountGateway, AppointmentReader, AppointmentScope, AppointmentWriter, ClinicListQuery,
    ClinicReader, ClinicWriter, NotificationReader, NotificationWriter, PatientReader,
    PaymentReader, PaymentWriter, SettingsReader, SettingsWriter, StaffReader, StaffWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl AccountGateway for Repository {
        async fn register_clinic(
            &self,
            registration: &NewClinicRegistration,
        ) -> RepositoryResult<Clinic>;
        async fn login(&self, email: &str, password: &str) -> RepositoryResult<String>;
    }

    #[async_trait]
    impl ClinicReader for Repository {
        async fn list_clinics(&self, query: ClinicListQuery) -> RepositoryResult<(usize, Vec<Clinic>)>;
        async fn platform_counters(&self) -> RepositoryResult<PlatformCounters>;
    }

    #[async_trait]
    impl ClinicWriter for Repository {
        async fn decide_clinic(
            &self,
            id: ClinicId,
            decision: &ClinicDecision,
        ) -> RepositoryResult<Clinic>;
    }

    #[async_trait]
    impl SettingsReader for Repository {
        async fn get_settings(&self) -> RepositoryResult<ClinicSettings>;
    }

    #[async_trait]
    impl SettingsWriter for Repository {
        async fn update_settings(&self, settings: &ClinicSettings) -> RepositoryResult<ClinicSettings>;
        async fn upload_logo(&self, logo: &LogoUpload) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl StaffReader for Repository {
        async fn list_staff(&self) -> RepositoryResult<Vec<StaffMember>>;
        async fn list_doctors(&self, clinic_id: ClinicId) -> RepositoryResult<Vec<StaffMember>>;
    }

    #[async_trait]
    impl StaffWriter for Repository {
        async fn create_doctor(&self, doctor: &NewDoctor) -> RepositoryResult<StaffMember>;
        async fn create_secretary(&self, secretary: &NewSecretary) -> RepositoryResult<StaffMember>;
        async fn set_staff_active(&self, id: StaffId, active: bool) -> RepositoryResult<StaffMember>;
        async fn remove_staff(&self, id: StaffId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl AppointmentReader for Repository {
        async fn list_appointments(
            &self,
            scope: AppointmentScope,
        ) -> RepositoryResult<Vec<Appointment>>;
    }

    #[async_trait]
    impl AppointmentWriter for Repository {
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
    impl PatientReader for Repository {
        async fn search_patients(&self, term: &str) -> RepositoryResult<Vec<PatientSummary>>;
    }

    #[async_trait]
    impl PaymentReader for Repository {
        async fn daily_payments(&self, date: NaiveDate) -> RepositoryResult<DailyPayments>;
    }

    #[async_trait]
    impl PaymentWriter for Repository {
        async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<Payment>;
    }

    #[async_trait]
    impl NotificationReader for Repository {
        async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>>;
    }

    #[async_trait]
    impl NotificationWriter for Repository {
        async fn mark_notification_read(&self, id: NotificationId) -> RepositoryResult<()>;
        async fn mark_all_notifications_read(&self) -> RepositoryResult<()>;
    }
}
