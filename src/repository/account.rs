use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::domain::clinic::{Clinic, NewClinicRegistration};
use crate::models::clinic::{ApiClinic, ApiClinicRegistration};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AccountGateway, ApiSession};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token")]
    token: String,
}

#[async_trait]
impl AccountGateway for ApiSession<'_> {
    async fn register_clinic(
        &self,
        registration: &NewClinicRegistration,
    ) -> RepositoryResult<Clinic> {
        let body = ApiClinicRegistration::from(registration);
        let clinic: ApiClinic = self
            .fetch(self.request(Method::POST, "/register/clinic").json(&body))
            .await?;
        Ok(Clinic::try_from(clinic)?)
    }

    async fn login(&self, email: &str, password: &str) -> RepositoryResult<String> {
        let response: LoginResponse = self
            .fetch(
                self.request(Method::POST, "/login")
                    .json(&LoginRequest { email, password }),
            )
            .await?;
        Ok(response.token)
    }
}
