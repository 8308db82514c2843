use serde::Serialize;
use ts_rs::TS;

/// 评语业务模型（每个提交与一次批准事件 1:1 绑定）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/feedback.ts")]
pub struct Feedback {
    pub id: i64,
    pub portfolio_submission_id: i64,
    // 评审人（教师）ID
    pub user_id: i64,
    pub overall_comment: String,
    pub strengths: String,
    pub areas_for_improvement: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
