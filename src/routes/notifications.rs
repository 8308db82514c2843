use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::notifications::requests::{BroadcastNotificationRequest, NotificationListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::NotificationService;

use super::require_reviewer;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 辅助函数：提取当前用户 ID
fn current_user_id(req: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_user_id(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

// 广播通知给全体学生
pub async fn broadcast_notification(
    req: HttpRequest,
    body: web::Json<BroadcastNotificationRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    NOTIFICATION_SERVICE
        .broadcast_to_students(&req, body.into_inner())
        .await
}

// 当前用户的通知列表
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE
        .list_notifications(&req, user_id, query.into_inner())
        .await
}

// 当前用户的未读数量
pub async fn get_unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE.get_unread_count(&req, user_id).await
}

// 获取通知详情
pub async fn get_notification(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE
        .get_notification(&req, path.into_inner(), user_id)
        .await
}

// 标记已读
pub async fn mark_as_read(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE
        .mark_as_read(&req, path.into_inner(), user_id)
        .await
}

// 全部标记已读
pub async fn mark_all_as_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE.mark_all_as_read(&req, user_id).await
}

// 删除通知
pub async fn delete_notification(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    NOTIFICATION_SERVICE
        .delete_notification(&req, path.into_inner(), user_id)
        .await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .route("/broadcast", web::post().to(broadcast_notification))
            .route("/unread-count", web::get().to(get_unread_count))
            .route("/read-all", web::post().to(mark_all_as_read))
            .route("", web::get().to(list_notifications))
            .route("/{id}", web::get().to(get_notification))
            .route("/{id}/read", web::patch().to(mark_as_read))
            .route("/{id}", web::delete().to(delete_notification)),
    );
}
