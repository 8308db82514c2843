use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedbackService;
use crate::models::feedbacks::requests::UpdateFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 更新评语
/// PUT /feedbacks/{id}
pub async fn update_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
    req: UpdateFeedbackRequest,
) -> ActixResult<HttpResponse> {
    // overall_comment 如有提供不允许为空
    if let Some(comment) = &req.overall_comment
        && comment.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "overall_comment cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_feedback(feedback_id, req).await {
        Ok(Some(feedback)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "评语不存在",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
