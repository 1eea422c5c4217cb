use crate::domain::types::NotificationId;
use crate::dto::notifications::NotificationsPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{NotificationReader, NotificationWriter};
use crate::services::{ServiceError, ServiceResult};

/// Newest first, with the number still unread.
pub async fn list_notifications<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<NotificationsPageData>
where
    R: NotificationReader + ?Sized,
{
    let mut notifications = repo.list_notifications().await.map_err(|err| {
        log::error!("Failed to load notifications for {}: {err}", user.email);
        ServiceError::from(err)
    })?;
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(NotificationsPageData {
        unread: notifications.iter().filter(|n| !n.read).count(),
        notifications,
    })
}

pub async fn mark_read<R>(
    repo: &R,
    user: &AuthenticatedUser,
    notification_id: i32,
) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    let notification_id = NotificationId::new(notification_id)?;

    repo.mark_notification_read(notification_id)
        .await
        .map_err(|err| {
            log::error!(
                "Failed to mark notification {notification_id} read for {}: {err}",
                user.email
            );
            ServiceError::from(err)
        })
}

pub async fn mark_all_read<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    repo.mark_all_notifications_read().await.map_err(|err| {
        log::error!("Failed to mark notifications read for {}: {err}", user.email);
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::Notification;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{at, user_with};

    fn notification(id: i32, day: u32, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).unwrap(),
            title: format!("Notice {id}"),
            body: String::new(),
            read,
            created_at: at(day, 9),
        }
    }

    /// Unread notifications are counted; newest come first.
    #[tokio::test]
    async fn list_counts_unread() {
        let mut repo = MockRepository::new();
        repo.expect_list_notifications().returning(|| {
            Ok(vec![
                notification(1, 3, true),
                notification(2, 5, false),
                notification(3, 4, false),
            ])
        });

        let data = list_notifications(&repo, &user_with(&["patient"], None))
            .await
            .unwrap();

        assert_eq!(data.unread, 2);
        assert_eq!(data.notifications[0].id.get(), 2);
    }

    /// Zero is not a valid notification id.
    #[tokio::test]
    async fn mark_read_rejects_bad_id() {
        let mut repo = MockRepository::new();
        repo.expect_mark_notification_read().never();

        assert!(matches!(
            mark_read(&repo, &user_with(&["doctor"], Some(1)), 0).await,
            Err(ServiceError::TypeConstraint(_))
        ));
    }
}
