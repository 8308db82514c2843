use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 列出所有提交
/// GET /submissions
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions().await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse::new(submissions),
            "查询成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 待审核队列，先提交的在前
/// GET /submissions/pending
pub async fn list_pending_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_pending_submissions().await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse::new(submissions),
            "查询成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 按状态列出提交
/// GET /submissions/status/{status}
pub async fn list_submissions_by_status(
    service: &SubmissionService,
    request: &HttpRequest,
    status: String,
) -> ActixResult<HttpResponse> {
    let status = match status.parse::<SubmissionStatus>() {
        Ok(s) => s,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, e)));
        }
    };

    let storage = service.get_storage(request);

    match storage.list_submissions_by_status(status).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse::new(submissions),
            "查询成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 某作品集的版本历史，新版本在前
/// GET /portfolios/{portfolio_id}/submissions
pub async fn list_portfolio_history(
    service: &SubmissionService,
    request: &HttpRequest,
    portfolio_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions_by_portfolio(portfolio_id).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse::new(submissions),
            "查询成功",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
