use async_trait::async_trait;
use reqwest::Method;

use crate::domain::notification::Notification;
use crate::domain::types::NotificationId;
use crate::models::notification::ApiNotification;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiSession, NotificationReader, NotificationWriter};

#[async_trait]
impl NotificationReader for ApiSession<'_> {
    async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>> {
        let notifications: Vec<ApiNotification> = self
            .fetch(self.request(Method::GET, "/notifications"))
            .await?;
        Ok(notifications
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

#[async_trait]
impl NotificationWriter for ApiSession<'_> {
    async fn mark_notification_read(&self, id: NotificationId) -> RepositoryResult<()> {
        self.execute(self.request(Method::POST, &format!("/notifications/{id}/read")))
            .await
    }

    async fn mark_all_notifications_read(&self) -> RepositoryResult<()> {
        self.execute(self.request(Method::POST, "/notifications/read-all"))
            .await
    }
}
