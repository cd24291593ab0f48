//! Notifications use case.
//!
//! Prefers the server's `/notifications` endpoint and derives alerts from
//! the financial data locally when that endpoint is unavailable.

use crate::client::executor::ApiClient;
use chrono::{DateTime, Utc};
use serde_json::Value;
use strata_domain::notification::derive_notifications;
use strata_domain::{Notification, NotificationList, RunwaySnapshot, ScenarioList};
use tracing::debug;

#[derive(Clone)]
pub struct NotificationsUseCase {
    client: ApiClient,
}

impl NotificationsUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> NotificationList {
        self.list_at(Utc::now()).await
    }

    /// Like [`list`](Self::list) with an explicit clock for the derived
    /// timestamps.
    pub async fn list_at(&self, now: DateTime<Utc>) -> NotificationList {
        let notifications = match self.client.get::<NotificationList>("/notifications").await {
            Ok(list) => list.notifications,
            Err(e) => {
                debug!("Notifications endpoint unavailable, deriving locally: {}", e);
                self.derive(now).await
            }
        };
        let unread_count = notifications.iter().filter(|n| !n.read).count();
        NotificationList {
            notifications,
            unread_count,
        }
    }

    async fn derive(&self, now: DateTime<Utc>) -> Vec<Notification> {
        let runway = self
            .client
            .get::<RunwaySnapshot>("/financials/runway")
            .await
            .inspect_err(|e| debug!("No runway data for notifications: {}", e))
            .ok();
        let scenario_count = self
            .client
            .get::<ScenarioList>("/scenarios")
            .await
            .map(|list| list.scenarios.len())
            .unwrap_or(0);
        derive_notifications(runway.as_ref(), scenario_count, now)
    }

    /// Best effort: a failure is logged and otherwise ignored.
    pub async fn mark_read(&self, id: &str) {
        let path = format!("/notifications/{}/read", id);
        if let Err(e) = self.client.put::<Value, _>(&path, &serde_json::json!({})).await {
            debug!("Failed to mark notification {} as read: {}", id, e);
        }
    }

    /// Best effort: a failure is logged and otherwise ignored.
    pub async fn mark_all_read(&self) {
        if let Err(e) = self
            .client
            .put::<Value, _>("/notifications/read-all", &serde_json::json!({}))
            .await
        {
            debug!("Failed to mark all notifications as read: {}", e);
        }
    }
}
