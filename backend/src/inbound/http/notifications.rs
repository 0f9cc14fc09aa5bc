//! Notification inbox HTTP handlers.
//!
//! ```text
//! GET /api/v1/notifications
//! GET /api/v1/notifications/unread-count
//! PUT /api/v1/notifications/{id}/read
//! PUT /api/v1/notifications/read-all
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Notification, NotificationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, NotificationSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const NOTIFICATION_ID: FieldName = FieldName::new("id");

/// Number of unread notifications.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Number of notifications flipped to read.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// The requester's newest notifications.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Newest notifications first", body = [NotificationSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications",
    security(("SessionCookie" = []))
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Notification>>> {
    let user_id = session.require_user_id()?;
    let notifications = state.notifications.list(&user_id).await?;
    Ok(web::Json(notifications))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "unreadNotificationCount",
    security(("SessionCookie" = []))
)]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UnreadCountResponse>> {
    let user_id = session.require_user_id()?;
    let count = state.notifications.unread_count(&user_id).await?;
    Ok(web::Json(UnreadCountResponse { count }))
}

/// Mark every notification of the requester read.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "Notifications marked read", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead",
    security(("SessionCookie" = []))
)]
#[put("/notifications/read-all")]
pub async fn mark_all_read(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let user_id = session.require_user_id()?;
    let updated = state.notifications.mark_all_read(&user_id).await?;
    Ok(web::Json(MarkAllReadResponse { updated }))
}

/// Mark one notification read.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Addressed to someone else", body = ErrorSchema),
        (status = 404, description = "Notification not found", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead",
    security(("SessionCookie" = []))
)]
#[put("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Notification>> {
    let user_id = session.require_user_id()?;
    let id: NotificationId = parse_id(&path, NOTIFICATION_ID)?;
    let notification = state.notifications.mark_read(&id, &user_id).await?;
    Ok(web::Json(notification))
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
