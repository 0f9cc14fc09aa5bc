//! Notification inbox and the best-effort emitter used by lifecycle services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{INBOX_LIMIT, NotificationInbox, NotificationRepository};
use crate::domain::service_support::{ensure_owner, map_notification_error};
use crate::domain::{Error, Notification, NotificationDraft, NotificationId, UserId};

/// Persists notifications raised by other services.
///
/// Emission never fails the surrounding operation: store errors are logged
/// and dropped. Users are not notified about their own actions.
pub struct NotificationEmitter<N> {
    repo: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationEmitter<N> {
    pub fn new(repo: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<N> NotificationEmitter<N>
where
    N: NotificationRepository,
{
    pub async fn emit(&self, draft: NotificationDraft) {
        if draft.recipient == draft.sender {
            debug!(kind = draft.kind.as_str(), "skipping self-notification");
            return;
        }
        let kind = draft.kind;
        let notification =
            Notification::from_draft(NotificationId::random(), draft, self.clock.utc());
        if let Err(error) = self.repo.insert(&notification).await {
            warn!(
                kind = kind.as_str(),
                recipient = %notification.recipient,
                error = %error,
                "failed to store notification"
            );
        }
    }
}

/// Service implementing [`NotificationInbox`].
pub struct NotificationService<N> {
    repo: Arc<N>,
}

impl<N> NotificationService<N> {
    pub fn new(repo: Arc<N>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list(&self, recipient: &UserId) -> Result<Vec<Notification>, Error> {
        self.repo
            .list_for_recipient(recipient, INBOX_LIMIT)
            .await
            .map_err(map_notification_error)
    }

    async fn unread_count(&self, recipient: &UserId) -> Result<u64, Error> {
        self.repo
            .count_unread(recipient)
            .await
            .map_err(map_notification_error)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        requester: &UserId,
    ) -> Result<Notification, Error> {
        let notification = self
            .repo
            .find_by_id(id)
            .await
            .map_err(map_notification_error)?
            .ok_or_else(|| Error::not_found("notification not found"))?;
        ensure_owner(&notification.recipient, requester, "read this notification")?;
        if notification.is_read {
            return Ok(notification);
        }
        self.repo
            .mark_read(id)
            .await
            .map_err(map_notification_error)?
            .ok_or_else(|| Error::not_found("notification not found"))
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, Error> {
        self.repo
            .mark_all_read(recipient)
            .await
            .map_err(map_notification_error)
    }
}
