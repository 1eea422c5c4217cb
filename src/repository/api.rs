//! HTTP plumbing shared by every backend repository implementation.
//!
//! [`ApiRepository`] owns the pooled `reqwest` client and is registered once
//! as application data. Handlers borrow an [`ApiSession`] from it for the
//! current user; the session attaches the user's bearer token to every call.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct ApiRepository {
    client: Client,
    base_url: Arc<str>,
}

impl ApiRepository {
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Session acting on behalf of `user`.
    pub fn session<'a>(&'a self, user: &'a AuthenticatedUser) -> ApiSession<'a> {
        ApiSession {
            client: &self.client,
            base_url: self.base_url.as_ref(),
            token: Some(user.token.as_str()),
        }
    }

    /// Session for public endpoints such as login and registration.
    pub fn anonymous(&self) -> ApiSession<'_> {
        ApiSession {
            client: &self.client,
            base_url: self.base_url.as_ref(),
            token: None,
        }
    }
}

pub struct ApiSession<'a> {
    client: &'a Client,
    base_url: &'a str,
    token: Option<&'a str>,
}

impl ApiSession<'_> {
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");

        match self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and decodes a JSON body on success.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> RepositoryResult<T> {
        let response = Self::checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    /// Sends the request, discarding any success body.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> RepositoryResult<()> {
        Self::checked(builder).await.map(|_| ())
    }

    async fn checked(builder: RequestBuilder) -> RepositoryResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        log::warn!("Backend call {url} failed with {status}");
        Err(RepositoryError::from_response(status.as_u16(), &body))
    }
}
