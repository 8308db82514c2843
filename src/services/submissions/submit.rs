use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::ApiResponse;
use crate::services::storage_error_response;

/// 提交作品集
/// POST /submissions
pub async fn submit_portfolio(
    service: &SubmissionService,
    request: &HttpRequest,
    user_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.submit_portfolio(req.portfolio_id, user_id).await {
        Ok(submission) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}
