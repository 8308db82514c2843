use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::scorecards::requests::{CreateScorecardRequest, UpdateScorecardRequest};
use crate::services::ScorecardService;

use super::require_reviewer;

// 懒加载的全局 ScorecardService 实例
static SCORECARD_SERVICE: Lazy<ScorecardService> = Lazy::new(ScorecardService::new_lazy);

// 创建评分卡
pub async fn create_scorecard(
    req: HttpRequest,
    body: web::Json<CreateScorecardRequest>,
) -> ActixResult<HttpResponse> {
    let reviewer_id = match require_reviewer(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    SCORECARD_SERVICE
        .create_scorecard(&req, reviewer_id, body.into_inner())
        .await
}

// 更新评分卡
pub async fn update_scorecard(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateScorecardRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    SCORECARD_SERVICE
        .update_scorecard(&req, path.into_inner(), body.into_inner())
        .await
}

// 获取评分卡详情
pub async fn get_scorecard(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCORECARD_SERVICE.get_scorecard(&req, path.into_inner()).await
}

// 获取提交的评分卡
pub async fn get_scorecard_by_submission(
    req: HttpRequest,
    path: web::Path<i64>, // submission_id
) -> ActixResult<HttpResponse> {
    SCORECARD_SERVICE
        .get_scorecard_by_submission(&req, path.into_inner())
        .await
}

// 配置路由
//
// GET /submissions/{id}/scorecard 注册在 submissions 作用域内。
pub fn configure_scorecards_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/scorecards")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_scorecard))
            .route("/{id}", web::put().to(update_scorecard))
            .route("/{id}", web::get().to(get_scorecard)),
    );
}
