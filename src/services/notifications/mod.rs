pub mod broadcast;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::notifications::requests::{
    BroadcastNotificationRequest, CreateNotificationRequest, NotificationListQuery,
};
use crate::services::websocket;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 广播通知给全体学生
    pub async fn broadcast_to_students(
        &self,
        request: &HttpRequest,
        req: BroadcastNotificationRequest,
    ) -> ActixResult<HttpResponse> {
        broadcast::broadcast_to_students(self, request, req).await
    }

    /// 当前用户的通知列表
    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        user_id: i64,
        query: NotificationListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, user_id, query).await
    }

    /// 当前用户的未读数量
    pub async fn get_unread_count(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_unread_count(self, request, user_id).await
    }

    /// 获取通知详情
    pub async fn get_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_notification(self, request, notification_id, user_id).await
    }

    /// 标记已读
    pub async fn mark_as_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::mark_as_read(self, request, notification_id, user_id).await
    }

    /// 全部标记已读
    pub async fn mark_all_as_read(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::mark_all_as_read(self, request, user_id).await
    }

    /// 删除通知
    pub async fn delete_notification(
        &self,
        request: &HttpRequest,
        notification_id: i64,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_notification(self, request, notification_id, user_id).await
    }
}

/// 创建通知记录并尝试实时推送
///
/// 投递失败只记录日志，不影响触发方的请求处理。
pub async fn notify_user(storage: &Arc<dyn Storage>, req: CreateNotificationRequest) {
    let user_id = req.user_id;
    match storage.create_notification(req).await {
        Ok(notification) => {
            if websocket::push_notification_to_user(user_id, notification) {
                debug!("Notification delivered live to user {}", user_id);
            }
        }
        Err(e) => {
            warn!("Failed to create notification for user {}: {}", user_id, e);
        }
    }
}
