use serde::Serialize;

use crate::domain::notification::Notification;

#[derive(Debug, Serialize)]
pub struct NotificationsPageData {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}
