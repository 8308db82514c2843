use serde::Serialize;
use ts_rs::TS;

/// 通知业务模型
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub announcement_id: Option<i64>,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
