//! 单条通知的查询与管理
//!
//! 通知属于接收者本人，跨用户访问一律按不存在处理。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;
use std::sync::Arc;

// 查出通知并校验归属
async fn find_owned_notification(
    storage: &Arc<dyn Storage>,
    notification_id: i64,
    user_id: i64,
) -> Result<Option<Notification>, HttpResponse> {
    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(notification)) if notification.user_id == user_id => Ok(Some(notification)),
        Ok(_) => Ok(None),
        Err(e) => Err(storage_error_response(e)),
    }
}

/// 获取通知详情
/// GET /notifications/{id}
pub async fn get_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match find_owned_notification(&storage, notification_id, user_id).await {
        Ok(Some(notification)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(notification, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        ))),
        Err(resp) => Ok(resp),
    }
}

/// 标记已读
/// PATCH /notifications/{id}/read
pub async fn mark_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match find_owned_notification(&storage, notification_id, user_id).await {
        Ok(Some(_)) => match storage.mark_notification_as_read(notification_id).await {
            Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("标记成功"))),
            Err(e) => Ok(storage_error_response(e)),
        },
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        ))),
        Err(resp) => Ok(resp),
    }
}

/// 全部标记已读
/// POST /notifications/read-all
pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user_id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "标记成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 删除通知
/// DELETE /notifications/{id}
pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match find_owned_notification(&storage, notification_id, user_id).await {
        Ok(Some(_)) => match storage.delete_notification(notification_id).await {
            Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("删除成功"))),
            Err(e) => Ok(storage_error_response(e)),
        },
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotificationNotFound,
            "通知不存在",
        ))),
        Err(resp) => Ok(resp),
    }
}
