use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::NotificationId;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}
