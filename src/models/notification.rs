use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::domain::notification::Notification;
use crate::domain::types::{NotificationId, TypeConstraintError};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiNotification {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, alias = "is_read")]
    pub read: bool,
    #[serde(deserialize_with = "crate::models::datetime::deserialize")]
    pub created_at: NaiveDateTime,
}

impl TryFrom<ApiNotification> for Notification {
    type Error = TypeConstraintError;

    fn try_from(notification: ApiNotification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NotificationId::new(notification.id)?,
            title: notification.title,
            body: notification.body,
            read: notification.read,
            created_at: notification.created_at,
        })
    }
}
