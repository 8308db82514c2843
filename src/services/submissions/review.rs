//! 审核流程：标记审阅、批准、批准并附带评分卡
//!
//! 审核动作完成后给提交者发通知，通知失败不影响审核结果。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::ApproveWithScorecardRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{notifications, storage_error_response};
use crate::utils::validate;

/// 标记已审阅
/// POST /submissions/{id}/review
pub async fn mark_reviewed(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_submission_reviewed(submission_id).await {
        Ok(submission) => {
            notify_submitter(
                &storage,
                &submission,
                "作品集已审阅",
                "您的作品集已完成审阅，请查看评审意见",
                "submission_reviewed",
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "标记成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 标记已批准
/// POST /submissions/{id}/approve
pub async fn mark_approved(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_submission_approved(submission_id).await {
        Ok(submission) => {
            notify_submitter(
                &storage,
                &submission,
                "作品集已通过",
                "恭喜，您的作品集已通过审核",
                "submission_approved",
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "批准成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}

/// 批准并附带评分卡
/// POST /submissions/{id}/approve-with-scorecard
pub async fn approve_with_scorecard(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    reviewer_id: i64,
    req: ApproveWithScorecardRequest,
) -> ActixResult<HttpResponse> {
    // 校验先于任何写入
    if let Err(msg) = validate::validate_criteria(&req.scorecard.score_criteria) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Err(msg) = validate::validate_feedback(&req.feedback) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage
        .approve_with_scorecard(submission_id, reviewer_id, req.scorecard, req.feedback)
        .await
    {
        Ok(submission) => {
            notify_submitter(
                &storage,
                &submission,
                "作品集已通过",
                "恭喜，您的作品集已通过审核，评分和评语已出",
                "submission_approved",
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "批准成功")))
        }
        Err(e) => Ok(storage_error_response(e)),
    }
}

async fn notify_submitter(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    submission: &Submission,
    title: &str,
    message: &str,
    notification_type: &str,
) {
    notifications::notify_user(
        storage,
        CreateNotificationRequest {
            user_id: submission.user_id,
            title: title.to_string(),
            message: message.to_string(),
            notification_type: notification_type.to_string(),
            announcement_id: None,
        },
    )
    .await;
}
