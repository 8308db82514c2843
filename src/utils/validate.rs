//! 请求载荷校验
//!
//! 校验在任何写入之前完成，校验失败不会产生部分状态。

use crate::models::notifications::requests::BroadcastNotificationRequest;
use crate::models::scorecards::requests::ScoreCriterionPayload;
use crate::models::submissions::requests::FeedbackPayload;

/// 校验评分标准列表
pub fn validate_criteria(criteria: &[ScoreCriterionPayload]) -> Result<(), String> {
    for c in criteria {
        if c.criteria_name.trim().is_empty() {
            return Err("criteria_name is required".to_string());
        }
        if c.criteria_number < 1 {
            return Err("criteria_number must be at least 1".to_string());
        }
        if c.max_score <= 0.0 {
            return Err("max_score must be positive".to_string());
        }
        if c.score < 0.0 {
            return Err("score must be non-negative".to_string());
        }
        if c.score > c.max_score {
            return Err(format!(
                "score {} exceeds max_score {}",
                c.score, c.max_score
            ));
        }
        // 权重是 0-100 的百分比，权重总和由调用方负责
        if !(0.0..=100.0).contains(&c.weight_percent) {
            return Err("weight_percent must be between 0 and 100".to_string());
        }
    }
    Ok(())
}

/// 校验评语载荷
pub fn validate_feedback(feedback: &FeedbackPayload) -> Result<(), String> {
    if feedback.overall_comment.trim().is_empty() {
        return Err("overall_comment is required".to_string());
    }
    Ok(())
}

/// 校验广播通知请求
pub fn validate_broadcast(req: &BroadcastNotificationRequest) -> Result<(), String> {
    if req.notification_title.trim().is_empty() {
        return Err("notification_title is required".to_string());
    }
    if req.notification_message.trim().is_empty() {
        return Err("notification_message is required".to_string());
    }
    if req.notification_type.trim().is_empty() {
        return Err("notification_type is required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_criterion() -> ScoreCriterionPayload {
        ScoreCriterionPayload {
            id: None,
            criteria_number: 1,
            criteria_name: "Technical Skills".to_string(),
            max_score: 100.0,
            score: 85.0,
            weight_percent: 30.0,
            comment: Some("Strong technical ability".to_string()),
            order_index: 1,
        }
    }

    #[test]
    fn test_valid_criteria() {
        assert!(validate_criteria(&[valid_criterion()]).is_ok());
        assert!(validate_criteria(&[]).is_ok());
    }

    #[test]
    fn test_criteria_name_required() {
        let mut c = valid_criterion();
        c.criteria_name = "  ".to_string();
        assert!(validate_criteria(&[c]).is_err());
    }

    #[test]
    fn test_criteria_number_range() {
        let mut c = valid_criterion();
        c.criteria_number = 0;
        assert!(validate_criteria(&[c]).is_err());
    }

    #[test]
    fn test_weight_percent_range() {
        let mut c = valid_criterion();
        c.weight_percent = 120.0;
        assert!(validate_criteria(&[c]).is_err());

        let mut c = valid_criterion();
        c.weight_percent = -1.0;
        assert!(validate_criteria(&[c]).is_err());
    }

    #[test]
    fn test_score_cannot_exceed_max() {
        let mut c = valid_criterion();
        c.score = 101.0;
        assert!(validate_criteria(&[c]).is_err());
    }

    #[test]
    fn test_feedback_overall_comment_required() {
        let feedback = FeedbackPayload {
            overall_comment: "".to_string(),
            strengths: "Good structure".to_string(),
            areas_for_improvement: String::new(),
        };
        assert!(validate_feedback(&feedback).is_err());
    }

    #[test]
    fn test_broadcast_fields_required() {
        let req = BroadcastNotificationRequest {
            notification_title: "Deadline".to_string(),
            notification_message: "Submit before Friday".to_string(),
            notification_type: "announcement".to_string(),
            announcement_id: None,
        };
        assert!(validate_broadcast(&req).is_ok());

        let req = BroadcastNotificationRequest {
            notification_title: String::new(),
            notification_message: "Submit before Friday".to_string(),
            notification_type: "announcement".to_string(),
            announcement_id: None,
        };
        assert!(validate_broadcast(&req).is_err());
    }
}
