//! 评分计算引擎
//!
//! 纯函数，无副作用。总分采用加权公式：
//! total = Σ (score_i * weight_percent_i / 100)
//!
//! 满分固定为 100，与评分标准条目数量无关。

use crate::models::scorecards::requests::ScoreCriterionPayload;

/// 评分卡满分（固定值）
pub const MAX_SCORE: f64 = 100.0;

/// 按加权公式计算评分卡总分
///
/// 空列表返回 0。
pub fn compute_total(criteria: &[ScoreCriterionPayload]) -> f64 {
    criteria
        .iter()
        .map(|c| c.score * c.weight_percent / 100.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(score: f64, weight_percent: f64) -> ScoreCriterionPayload {
        ScoreCriterionPayload {
            id: None,
            criteria_number: 1,
            criteria_name: "Technical Skills".to_string(),
            max_score: 100.0,
            score,
            weight_percent,
            comment: None,
            order_index: 1,
        }
    }

    #[test]
    fn test_weighted_total() {
        let criteria = vec![criterion(80.0, 50.0), criterion(60.0, 50.0)];
        assert_eq!(compute_total(&criteria), 70.0);
    }

    #[test]
    fn test_empty_list_is_zero() {
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn test_single_full_weight() {
        let criteria = vec![criterion(85.0, 100.0)];
        assert_eq!(compute_total(&criteria), 85.0);
    }

    #[test]
    fn test_zero_weight_contributes_nothing() {
        let criteria = vec![criterion(90.0, 0.0), criterion(40.0, 100.0)];
        assert_eq!(compute_total(&criteria), 40.0);
    }
}
