use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT, RequireRole};
use crate::models::submissions::requests::{
    ApproveWithScorecardRequest, CreateSubmissionRequest, UpdateSubmissionStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;

use super::{require_admin, require_reviewer};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交作品集
pub async fn submit_portfolio(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    SUBMISSION_SERVICE
        .submit_portfolio(&req, user_id, body.into_inner())
        .await
}

// 列出所有提交（评审视角）
pub async fn list_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    SUBMISSION_SERVICE.list_submissions(&req).await
}

// 待审核队列
pub async fn list_pending_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_pending_submissions(&req).await
}

// 按状态列出提交
pub async fn list_submissions_by_status(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions_by_status(&req, path.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 某作品集的版本历史
pub async fn list_portfolio_history(
    req: HttpRequest,
    path: web::Path<i64>, // portfolio_id
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_portfolio_history(&req, path.into_inner())
        .await
}

// 标记已审阅
pub async fn mark_reviewed(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    SUBMISSION_SERVICE.mark_reviewed(&req, path.into_inner()).await
}

// 标记已批准
pub async fn mark_approved(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_reviewer(&req) {
        return Ok(resp);
    }
    SUBMISSION_SERVICE.mark_approved(&req, path.into_inner()).await
}

// 批准并附带评分卡
pub async fn approve_with_scorecard(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<ApproveWithScorecardRequest>,
) -> ActixResult<HttpResponse> {
    let reviewer_id = match require_reviewer(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    SUBMISSION_SERVICE
        .approve_with_scorecard(&req, path.into_inner(), reviewer_id, body.into_inner())
        .await
}

// 管理员直接改状态
pub async fn update_status(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSubmissionStatusRequest>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_admin(&req) {
        return Ok(resp);
    }
    SUBMISSION_SERVICE
        .update_status(&req, path.into_inner(), body.into_inner().status)
        .await
}

// 管理员删除提交
pub async fn delete_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_admin(&req) {
        return Ok(resp);
    }
    SUBMISSION_SERVICE
        .delete_submission(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                // 评审队列：教师或管理员
                web::scope("/pending")
                    .wrap(RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("", web::get().to(list_pending_submissions)),
            )
            .service(
                web::scope("/status")
                    .wrap(RequireRole::new_any(UserRole::reviewer_roles()))
                    .route("/{status}", web::get().to(list_submissions_by_status)),
            )
            .route("", web::post().to(submit_portfolio))
            .route("", web::get().to(list_submissions))
            .route("/{id}", web::get().to(get_submission))
            // 子资源路由必须挂在本作用域内，独立作用域会被前缀吞掉
            .route(
                "/{id}/scorecard",
                web::get().to(super::scorecards::get_scorecard_by_submission),
            )
            .route(
                "/{id}/feedback",
                web::get().to(super::feedbacks::get_feedback_by_submission),
            )
            .route("/{id}/review", web::post().to(mark_reviewed))
            .route("/{id}/approve", web::post().to(mark_approved))
            .route(
                "/{id}/approve-with-scorecard",
                web::post().to(approve_with_scorecard),
            )
            // 管理操作在处理程序里校验管理员角色
            .route("/{id}/status", web::patch().to(update_status))
            .route("/{id}", web::delete().to(delete_submission)),
    );

    // 作品集谱系的版本历史
    cfg.service(
        web::scope("/api/v1/portfolios/{portfolio_id}/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_portfolio_history)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    use crate::models::scorecards::requests::{ScoreCriterionPayload, ScorecardPayload};
    use crate::models::submissions::requests::FeedbackPayload;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{seed_user, storage};
    use crate::utils::jwt::JwtUtils;

    fn scorecard_payload() -> ScorecardPayload {
        ScorecardPayload {
            general_comment: Some("Solid work".to_string()),
            score_criteria: vec![ScoreCriterionPayload {
                id: None,
                criteria_number: 1,
                criteria_name: "Technical Skills".to_string(),
                max_score: 100.0,
                score: 80.0,
                weight_percent: 100.0,
                comment: None,
                order_index: 1,
            }],
        }
    }

    fn feedback_payload() -> FeedbackPayload {
        FeedbackPayload {
            overall_comment: "Well organized portfolio".to_string(),
            strengths: String::new(),
            areas_for_improvement: String::new(),
        }
    }

    // 子资源路由必须与 /submissions/{id} 同作用域注册，
    // 独立作用域会被 /api/v1/submissions 前缀吞掉而 404
    #[actix_web::test]
    async fn test_submission_subresource_routes_reachable() {
        let raw = storage().await;
        let reviewer_id = seed_user(&raw, "reviewer", "teacher").await;
        let student_id = seed_user(&raw, "student", "student").await;

        let shared: Arc<dyn Storage> = Arc::new(raw);
        let submission = shared.submit_portfolio(1, student_id).await.unwrap();
        shared
            .approve_with_scorecard(
                submission.id,
                reviewer_id,
                scorecard_payload(),
                feedback_payload(),
            )
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(shared.clone()))
                .configure(super::configure_submissions_routes)
                .configure(crate::routes::configure_scorecards_routes)
                .configure(crate::routes::configure_feedbacks_routes),
        )
        .await;

        let token = JwtUtils::generate_access_token(reviewer_id, "teacher").unwrap();

        for path in [
            format!("/api/v1/submissions/{}", submission.id),
            format!("/api/v1/submissions/{}/scorecard", submission.id),
            format!("/api/v1/submissions/{}/feedback", submission.id),
        ] {
            let req = test::TestRequest::get()
                .uri(&path)
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
        }
    }
}
