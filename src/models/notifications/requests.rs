use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建单条通知（内部使用，不直接暴露为 HTTP 接口）
#[derive(Debug, Clone)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub announcement_id: Option<i64>,
}

/// 广播通知请求（全体学生）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct BroadcastNotificationRequest {
    pub notification_title: String,
    pub notification_message: String,
    pub notification_type: String,
    pub announcement_id: Option<i64>,
}

/// 通知列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 仅未读
    pub unread_only: Option<bool>,
}
