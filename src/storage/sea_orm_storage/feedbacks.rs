//! 评语实现

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{PortfolioSystemError, Result};
use crate::models::feedbacks::entities::Feedback;
use crate::models::feedbacks::requests::UpdateFeedbackRequest;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::feedbacks::Column as FeedbackColumn;

impl SeaOrmStorage {
    pub(super) async fn get_feedback_by_id_impl(
        &self,
        feedback_id: i64,
    ) -> Result<Option<Feedback>> {
        let feedback = Feedbacks::find_by_id(feedback_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评语失败: {e}"))
            })?;

        Ok(feedback.map(|f| f.into_feedback()))
    }

    pub(super) async fn get_feedback_by_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Feedback>> {
        let feedback = Feedbacks::find()
            .filter(FeedbackColumn::PortfolioSubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评语失败: {e}"))
            })?;

        Ok(feedback.map(|f| f.into_feedback()))
    }

    /// 更新评语，只覆盖载荷里出现的字段
    pub(super) async fn update_feedback_impl(
        &self,
        feedback_id: i64,
        req: UpdateFeedbackRequest,
    ) -> Result<Option<Feedback>> {
        let Some(feedback) = Feedbacks::find_by_id(feedback_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评语失败: {e}"))
            })?
        else {
            return Ok(None);
        };

        let mut active: FeedbackActiveModel = feedback.into();
        if let Some(overall_comment) = req.overall_comment {
            active.overall_comment = Set(overall_comment);
        }
        if let Some(strengths) = req.strengths {
            active.strengths = Set(strengths);
        }
        if let Some(areas_for_improvement) = req.areas_for_improvement {
            active.areas_for_improvement = Set(areas_for_improvement);
        }

        let updated = active.update(&self.db).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("更新评语失败: {e}"))
        })?;

        Ok(Some(updated.into_feedback()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scorecards::requests::{ScoreCriterionPayload, ScorecardPayload};
    use crate::models::submissions::requests::FeedbackPayload;
    use crate::storage::sea_orm_storage::test_support::{seed_user, storage};

    async fn seeded_feedback(storage: &SeaOrmStorage) -> Feedback {
        let student = seed_user(storage, "student", "student").await;
        let teacher = seed_user(storage, "teacher", "teacher").await;
        let submission = storage.submit_portfolio_impl(1, student).await.unwrap();

        storage
            .approve_with_scorecard_impl(
                submission.id,
                teacher,
                ScorecardPayload {
                    general_comment: None,
                    score_criteria: vec![ScoreCriterionPayload {
                        id: None,
                        criteria_number: 1,
                        criteria_name: "Overall".to_string(),
                        max_score: 100.0,
                        score: 75.0,
                        weight_percent: 100.0,
                        comment: None,
                        order_index: 1,
                    }],
                },
                FeedbackPayload {
                    overall_comment: "Good start".to_string(),
                    strengths: "Structure".to_string(),
                    areas_for_improvement: "Depth".to_string(),
                },
            )
            .await
            .unwrap();

        storage
            .get_feedback_by_submission_impl(submission.id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let storage = storage().await;
        let feedback = seeded_feedback(&storage).await;

        let updated = storage
            .update_feedback_impl(
                feedback.id,
                UpdateFeedbackRequest {
                    overall_comment: Some("Revised comment".to_string()),
                    strengths: None,
                    areas_for_improvement: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.overall_comment, "Revised comment");
        assert_eq!(updated.strengths, "Structure");
        assert_eq!(updated.areas_for_improvement, "Depth");
    }

    #[tokio::test]
    async fn test_update_missing_feedback_returns_none() {
        let storage = storage().await;
        let result = storage
            .update_feedback_impl(
                999,
                UpdateFeedbackRequest {
                    overall_comment: Some("anything".to_string()),
                    strengths: None,
                    areas_for_improvement: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
