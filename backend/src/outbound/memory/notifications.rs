//! Notification repository over the in-memory store.

use async_trait::async_trait;

use super::{InMemoryStore, newest_first};
use crate::domain::ports::{NotificationRepository, NotificationRepositoryError};
use crate::domain::{Notification, NotificationId, UserId};

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), NotificationRepositoryError> {
        self.lock().notifications.push(notification.clone());
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        let state = self.lock();
        let mut notifications = newest_first(
            state
                .notifications
                .iter()
                .filter(|notification| notification.recipient == *recipient),
            |notification| notification.created_at,
        );
        notifications.truncate(limit as usize);
        Ok(notifications)
    }

    async fn count_unread(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let count = self
            .lock()
            .notifications
            .iter()
            .filter(|notification| notification.recipient == *recipient && !notification.is_read)
            .count();
        Ok(count as u64)
    }

    async fn find_by_id(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        Ok(self
            .lock()
            .notifications
            .iter()
            .find(|notification| notification.id == *id)
            .cloned())
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, NotificationRepositoryError> {
        let mut state = self.lock();
        Ok(state
            .notifications
            .iter_mut()
            .find(|notification| notification.id == *id)
            .map(|notification| {
                notification.is_read = true;
                notification.clone()
            }))
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, NotificationRepositoryError> {
        let mut state = self.lock();
        let mut updated = 0_u64;
        for notification in state
            .notifications
            .iter_mut()
            .filter(|notification| notification.recipient == *recipient && !notification.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
