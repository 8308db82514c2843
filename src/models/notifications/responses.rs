use serde::Serialize;
use ts_rs::TS;

use super::entities::Notification;
use crate::models::common::pagination::PaginationInfo;

/// 通知列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub pagination: PaginationInfo,
}

/// 未读通知数量响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// 标记全部已读响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct MarkAllReadResponse {
    pub marked_count: i64,
}

/// 广播结果响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/notification.ts")]
pub struct BroadcastResponse {
    /// 成功创建的通知数量
    pub count: i64,
}
