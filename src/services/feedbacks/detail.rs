use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedbackService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 获取评语详情
/// GET /feedbacks/{id}
pub async fn get_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "评语不存在",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 获取提交的评语
/// GET /submissions/{id}/feedback
pub async fn get_feedback_by_submission(
    service: &FeedbackService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_feedback_by_submission(submission_id).await {
        Ok(Some(feedback)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "该提交尚无评语",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
