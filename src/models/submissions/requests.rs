use serde::Deserialize;
use ts_rs::TS;

use crate::models::scorecards::requests::ScorecardPayload;
use crate::models::submissions::entities::SubmissionStatus;

/// 提交作品集请求
///
/// 提交人从 JWT 中获取，不由请求体指定。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/submission.ts")]
pub struct CreateSubmissionRequest {
    pub portfolio_id: i64,
}

/// 管理员直接修改状态请求（绕过状态机校验的后门，需要 admin 权限）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/submission.ts")]
pub struct UpdateSubmissionStatusRequest {
    pub status: SubmissionStatus,
}

/// 评语内容
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "bindings/feedback.ts")]
pub struct FeedbackPayload {
    pub overall_comment: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub areas_for_improvement: String,
}

/// 批准并附带评分卡请求
///
/// 评分卡、评分标准、评语、状态变更在一个事务中完成。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/submission.ts")]
pub struct ApproveWithScorecardRequest {
    pub scorecard: ScorecardPayload,
    pub feedback: FeedbackPayload,
}
