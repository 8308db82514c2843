//! 管理操作：直接改状态、删除提交
//!
//! 状态覆盖不做状态机校验，要求修订时给提交者发通知。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{notifications, storage_error_response};

/// 管理员直接设置提交状态
/// PATCH /submissions/{id}/status
pub async fn update_status(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    status: SubmissionStatus,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_submission_status(submission_id, status).await {
        Ok(submission) => {
            if status == SubmissionStatus::RevisionRequested {
                notifications::notify_user(
                    &storage,
                    CreateNotificationRequest {
                        user_id: submission.user_id,
                        title: "作品集需要修订".to_string(),
                        message: "您的作品集需要修订后重新提交".to_string(),
                        notification_type: "revision_requested".to_string(),
                        announcement_id: None,
                    },
                )
                .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "状态更新成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 管理员删除提交
/// DELETE /submissions/{id}
pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_submission(submission_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
