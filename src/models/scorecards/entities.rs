use serde::Serialize;
use ts_rs::TS;

/// 评分卡业务模型（含评分标准明细）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct Scorecard {
    pub id: i64,
    pub portfolio_submission_id: i64,
    // 评审人（教师）ID
    pub user_id: i64,
    pub total_score: f64,
    pub max_score: f64,
    pub general_comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub score_criteria: Vec<ScoreCriterion>,
}

/// 评分标准业务模型（评分卡中的一条加权评分项）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "bindings/scorecard.ts")]
pub struct ScoreCriterion {
    pub id: i64,
    pub scorecard_id: i64,
    pub criteria_number: i32,
    pub criteria_name: String,
    pub max_score: f64,
    pub score: f64,
    pub weight_percent: f64,
    pub comment: Option<String>,
    pub order_index: i32,
}
