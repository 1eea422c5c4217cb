use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::domain::clinic::{
    Clinic, ClinicDecision, ClinicSettings, LogoUpload, PlatformCounters,
};
use crate::domain::types::ClinicId;
use crate::models::clinic::{ApiClinic, ApiClinicSettings, ApiPage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ApiSession, ClinicListQuery, ClinicReader, ClinicWriter, SettingsReader, SettingsWriter,
};

fn list_params(query: &ClinicListQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(status) = &query.status {
        params.push(("status", status.as_str().to_string()));
    }
    if let Some(search) = &query.search {
        params.push(("search", search.clone()));
    }
    if let Some(pagination) = &query.pagination {
        params.push(("page", pagination.page.to_string()));
        params.push(("per_page", pagination.per_page.to_string()));
    }
    params
}

#[async_trait]
impl ClinicReader for ApiSession<'_> {
    async fn list_clinics(&self, query: ClinicListQuery) -> RepositoryResult<(usize, Vec<Clinic>)> {
        let page: ApiPage<ApiClinic> = self
            .fetch(
                self.request(Method::GET, "/admin/clinics")
                    .query(&list_params(&query)),
            )
            .await?;

        let clinics = page
            .items
            .into_iter()
            .map(Clinic::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((page.total, clinics))
    }

    async fn platform_counters(&self) -> RepositoryResult<PlatformCounters> {
        self.fetch(self.request(Method::GET, "/admin/dashboard/stats"))
            .await
    }
}

#[async_trait]
impl ClinicWriter for ApiSession<'_> {
    async fn decide_clinic(
        &self,
        id: ClinicId,
        decision: &ClinicDecision,
    ) -> RepositoryResult<Clinic> {
        let path = format!("/admin/clinics/{id}/{}", decision.action());
        let mut request = self.request(Method::POST, &path);
        if let ClinicDecision::Reject(reason) = decision {
            request = request.json(&json!({ "reason": reason.as_str() }));
        }

        let clinic: ApiClinic = self.fetch(request).await?;
        Ok(Clinic::try_from(clinic)?)
    }
}

#[async_trait]
impl SettingsReader for ApiSession<'_> {
    async fn get_settings(&self) -> RepositoryResult<ClinicSettings> {
        let settings: ApiClinicSettings = self
            .fetch(self.request(Method::GET, "/clinic/settings"))
            .await?;
        Ok(ClinicSettings::try_from(settings)?)
    }
}

#[async_trait]
impl SettingsWriter for ApiSession<'_> {
    async fn update_settings(&self, settings: &ClinicSettings) -> RepositoryResult<ClinicSettings> {
        let body = ApiClinicSettings::from(settings);
        let updated: ApiClinicSettings = self
            .fetch(self.request(Method::PUT, "/clinic/settings").json(&body))
            .await?;
        Ok(ClinicSettings::try_from(updated)?)
    }

    async fn upload_logo(&self, logo: &LogoUpload) -> RepositoryResult<()> {
        let part = Part::bytes(logo.bytes.clone())
            .file_name(logo.file_name.clone())
            .mime_str(&logo.content_type)?;
        let form = Form::new().part("logo", part);

        self.execute(
            self.request(Method::POST, "/clinic/settings/logo")
                .multipart(form),
        )
        .await
    }
}
