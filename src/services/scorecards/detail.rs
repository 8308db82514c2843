use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScorecardService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 获取评分卡详情
/// GET /scorecards/{id}
pub async fn get_scorecard(
    service: &ScorecardService,
    request: &HttpRequest,
    scorecard_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_scorecard_by_id(scorecard_id).await {
        Ok(Some(scorecard)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(scorecard, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScorecardNotFound,
            "评分卡不存在",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 获取提交的评分卡
/// GET /submissions/{id}/scorecard
pub async fn get_scorecard_by_submission(
    service: &ScorecardService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_scorecard_by_submission(submission_id).await {
        Ok(Some(scorecard)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(scorecard, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScorecardNotFound,
            "该提交尚未评分",
        ))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
