use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedbacks::requests::UpdateFeedbackRequest;
use crate::services::FeedbackService;

use super::require_reviewer;

// 懒加载的全局 FeedbackService 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

// 获取评语详情
pub async fn get_feedback(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.get_feedback(&req, path.into_inner()).await
}

// 获取提交的评语
pub async fn get_feedback_by_submission(
    req: HttpRequest,
    path: web::Path<i64>, // submission_id
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .get_feedback_by_submission(&req, path.into_inner())
        .await
}

// 更新评语
pub async fn update_feedback(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    FEEDBACK_SERVICE
        .update_feedback(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
//
// GET /submissions/{id}/feedback 注册在 submissions 作用域内。
pub fn configure_feedbacks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedbacks")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::get().to(get_feedback))
            .route("/{id}", web::put().to(update_feedback)),
    );
}
