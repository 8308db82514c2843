use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScorecardService;
use crate::models::scorecards::requests::CreateScorecardRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate;

/// 创建评分卡
/// POST /scorecards
pub async fn create_scorecard(
    service: &ScorecardService,
    request: &HttpRequest,
    reviewer_id: i64,
    req: CreateScorecardRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate::validate_criteria(&req.score_criteria) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_scorecard(reviewer_id, req).await {
        Ok(scorecard) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(scorecard, "创建成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}
