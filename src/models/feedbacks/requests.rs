use serde::Deserialize;
use ts_rs::TS;

/// 更新评语请求（缺省字段保持原值）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/feedback.ts")]
pub struct UpdateFeedbackRequest {
    pub overall_comment: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
}
