use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScorecardService;
use crate::models::scorecards::requests::UpdateScorecardRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::utils::validate;

/// 更新评分卡
/// PUT /scorecards/{id}
pub async fn update_scorecard(
    service: &ScorecardService,
    request: &HttpRequest,
    scorecard_id: i64,
    req: UpdateScorecardRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate::validate_criteria(&req.score_criteria) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_scorecard(scorecard_id, req).await {
        Ok(scorecard) => Ok(HttpResponse::Ok().json(ApiResponse::success(scorecard, "更新成功"))),
        Err(e) => Ok(storage_error_response(e)),
    }
}
