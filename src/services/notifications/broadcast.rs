//! 广播通知
//!
//! 逐个受众创建通知记录，单个受众失败不中断剩余受众。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::NotificationService;
use crate::models::notifications::requests::{
    BroadcastNotificationRequest, CreateNotificationRequest,
};
use crate::models::notifications::responses::BroadcastResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, websocket};
use crate::utils::validate;

/// 广播通知给全体学生
/// POST /notifications/broadcast
pub async fn broadcast_to_students(
    service: &NotificationService,
    request: &HttpRequest,
    req: BroadcastNotificationRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate::validate_broadcast(&req) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    let students = match storage.list_students().await {
        Ok(students) => students,
        Err(e) => return Ok(storage_error_response(e)),
    };

    let mut created: i64 = 0;
    for student in &students {
        let create_req = CreateNotificationRequest {
            user_id: student.id,
            title: req.notification_title.clone(),
            message: req.notification_message.clone(),
            notification_type: req.notification_type.clone(),
            announcement_id: req.announcement_id,
        };

        // 尽力而为：单个受众失败只记录，不中断广播
        match storage.create_notification(create_req).await {
            Ok(notification) => {
                created += 1;
                websocket::push_notification_to_user(student.id, notification);
            }
            Err(e) => {
                warn!(
                    "Failed to create broadcast notification for user {}: {}",
                    student.id, e
                );
            }
        }
    }

    info!(
        "Broadcast '{}' delivered to {}/{} students",
        req.notification_title,
        created,
        students.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BroadcastResponse { count: created },
        "广播完成",
    )))
}
