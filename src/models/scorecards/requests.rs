use serde::Deserialize;
use ts_rs::TS;

/// 评分标准条目
///
/// id 为空表示新建；携带 id 则按 id 更新本评分卡中的既有条目，
/// 属于其他评分卡的 id 会被忽略。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct ScoreCriterionPayload {
    pub id: Option<i64>,
    pub criteria_number: i32,
    pub criteria_name: String,
    pub max_score: f64,
    pub score: f64,
    pub weight_percent: f64,
    pub comment: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

/// 评分卡内容（不含提交引用，用于 approve-with-scorecard 的嵌套载荷）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct ScorecardPayload {
    pub general_comment: Option<String>,
    pub score_criteria: Vec<ScoreCriterionPayload>,
}

/// 创建评分卡请求（独立评分入口）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct CreateScorecardRequest {
    pub portfolio_submission_id: i64,
    pub general_comment: Option<String>,
    pub score_criteria: Vec<ScoreCriterionPayload>,
}

/// 更新评分卡请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct UpdateScorecardRequest {
    pub general_comment: Option<String>,
    pub score_criteria: Vec<ScoreCriterionPayload>,
}
