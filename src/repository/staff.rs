use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::domain::staff::{NewDoctor, NewSecretary, StaffMember};
use crate::domain::types::{ClinicId, StaffId};
use crate::models::staff::{ApiNewDoctor, ApiNewSecretary, ApiStaffMember};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiSession, StaffReader, StaffWriter};

fn into_members(members: Vec<ApiStaffMember>) -> RepositoryResult<Vec<StaffMember>> {
    Ok(members
        .into_iter()
        .map(StaffMember::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}

#[async_trait]
impl StaffReader for ApiSession<'_> {
    async fn list_staff(&self) -> RepositoryResult<Vec<StaffMember>> {
        let members: Vec<ApiStaffMember> = self
            .fetch(self.request(Method::GET, "/clinic/staff"))
            .await?;
        into_members(members)
    }

    async fn list_doctors(&self, clinic_id: ClinicId) -> RepositoryResult<Vec<StaffMember>> {
        let members: Vec<ApiStaffMember> = self
            .fetch(
                self.request(Method::GET, "/clinic/doctors")
                    .query(&[("clinic_id", clinic_id.get())]),
            )
            .await?;
        into_members(members)
    }
}

#[async_trait]
impl StaffWriter for ApiSession<'_> {
    async fn create_doctor(&self, doctor: &NewDoctor) -> RepositoryResult<StaffMember> {
        let member: ApiStaffMember = self
            .fetch(
                self.request(Method::POST, "/clinic/doctors")
                    .json(&ApiNewDoctor::from(doctor)),
            )
            .await?;
        Ok(StaffMember::try_from(member)?)
    }

    async fn create_secretary(&self, secretary: &NewSecretary) -> RepositoryResult<StaffMember> {
        let member: ApiStaffMember = self
            .fetch(
                self.request(Method::POST, "/clinic/secretaries")
                    .json(&ApiNewSecretary::from(secretary)),
            )
            .await?;
        Ok(StaffMember::try_from(member)?)
    }

    async fn set_staff_active(&self, id: StaffId, active: bool) -> RepositoryResult<StaffMember> {
        let member: ApiStaffMember = self
            .fetch(
                self.request(Method::PATCH, &format!("/clinic/staff/{id}/status"))
                    .json(&json!({ "active": active })),
            )
            .await?;
        Ok(StaffMember::try_from(member)?)
    }

    async fn remove_staff(&self, id: StaffId) -> RepositoryResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/clinic/staff/{id}")))
            .await
    }
}
