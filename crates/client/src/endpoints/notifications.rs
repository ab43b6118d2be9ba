//! Notification endpoints

use campushub_domain::Notification;

use crate::api::{ApiClient, ApiError, QueryPairs};

impl ApiClient {
    /// Notifications for the signed-in user, newest first.
    pub async fn notifications(
        &self,
        unread_only: bool,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>, ApiError> {
        let mut query = QueryPairs::new();
        if unread_only {
            query.push("unread_only", "true");
        }
        query.push_opt_display("limit", limit);
        self.get_with("/notifications", query).await
    }

    /// Mark one notification as read.
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.post_empty(&format!("/notifications/{}/read", notification_id)).await?;
        Ok(())
    }

    /// Mark every notification as read.
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.post_empty("/notifications/read-all").await?;
        Ok(())
    }
}
