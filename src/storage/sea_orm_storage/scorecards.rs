//! 评分卡实现
//!
//! 评分卡与其评分标准一起写入；更新时条目按 ID 对账，
//! 不做隐式删除。

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{PortfolioSystemError, Result};
use crate::models::scorecards::entities::Scorecard;
use crate::models::scorecards::requests::{CreateScorecardRequest, UpdateScorecardRequest};
use crate::utils::scoring;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entity::score_criteria::Column as CriterionColumn;
use crate::entity::scorecards::Column as ScorecardColumn;

impl SeaOrmStorage {
    /// 创建评分卡（独立评分入口，不改提交状态）
    pub(super) async fn create_scorecard_impl(
        &self,
        reviewer_id: i64,
        req: CreateScorecardRequest,
    ) -> Result<Scorecard> {
        let txn = self.db.begin().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let submission_exists = PortfolioSubmissions::find_by_id(req.portfolio_submission_id)
            .one(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交失败: {e}"))
            })?
            .is_some();
        if !submission_exists {
            return Err(PortfolioSystemError::not_found(format!(
                "提交 {} 不存在",
                req.portfolio_submission_id
            )));
        }

        let total_score = scoring::compute_total(&req.score_criteria);
        let now = chrono::Utc::now().timestamp();

        let card = ScorecardActiveModel {
            portfolio_submission_id: Set(req.portfolio_submission_id),
            user_id: Set(reviewer_id),
            total_score: Set(total_score),
            max_score: Set(scoring::MAX_SCORE),
            general_comment: Set(req.general_comment.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            PortfolioSystemError::database_operation(format!("插入评分卡失败: {e}"))
        })?;

        for criterion in &req.score_criteria {
            ScoreCriterionActiveModel {
                scorecard_id: Set(card.id),
                criteria_number: Set(criterion.criteria_number),
                criteria_name: Set(criterion.criteria_name.clone()),
                max_score: Set(criterion.max_score),
                score: Set(criterion.score),
                weight_percent: Set(criterion.weight_percent),
                comment: Set(criterion.comment.clone()),
                order_index: Set(criterion.order_index),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("插入评分标准失败: {e}"))
            })?;
        }

        txn.commit().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("提交事务失败: {e}"))
        })?;

        self.load_scorecard(card.id).await
    }

    /// 更新评分卡
    ///
    /// 条目对账规则：无 id 的条目新建；id 属于本评分卡的条目更新；
    /// id 属于其他评分卡的条目忽略。不在载荷里的既有条目保持不变。
    /// 总分按载荷重新计算。
    pub(super) async fn update_scorecard_impl(
        &self,
        scorecard_id: i64,
        req: UpdateScorecardRequest,
    ) -> Result<Scorecard> {
        let txn = self.db.begin().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let card = Scorecards::find_by_id(scorecard_id)
            .one(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分卡失败: {e}"))
            })?
            .ok_or_else(|| {
                PortfolioSystemError::not_found(format!("评分卡 {scorecard_id} 不存在"))
            })?;

        // 本卡既有条目的 ID 集合，用于区分更新和外卡 ID
        let existing_ids: std::collections::HashSet<i64> = ScoreCriteria::find()
            .filter(CriterionColumn::ScorecardId.eq(scorecard_id))
            .all(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分标准失败: {e}"))
            })?
            .into_iter()
            .map(|c| c.id)
            .collect();

        for criterion in &req.score_criteria {
            match criterion.id {
                Some(id) if existing_ids.contains(&id) => {
                    let existing = ScoreCriteria::find_by_id(id)
                        .one(&txn)
                        .await
                        .map_err(|e| {
                            PortfolioSystemError::database_operation(format!(
                                "查询评分标准失败: {e}"
                            ))
                        })?
                        .ok_or_else(|| {
                            PortfolioSystemError::not_found(format!("评分标准 {id} 不存在"))
                        })?;

                    let mut active: ScoreCriterionActiveModel = existing.into();
                    active.criteria_number = Set(criterion.criteria_number);
                    active.criteria_name = Set(criterion.criteria_name.clone());
                    active.max_score = Set(criterion.max_score);
                    active.score = Set(criterion.score);
                    active.weight_percent = Set(criterion.weight_percent);
                    active.comment = Set(criterion.comment.clone());
                    active.order_index = Set(criterion.order_index);
                    active.update(&txn).await.map_err(|e| {
                        PortfolioSystemError::database_operation(format!(
                            "更新评分标准失败: {e}"
                        ))
                    })?;
                }
                Some(_) => {
                    // 外卡 ID，跳过
                }
                None => {
                    ScoreCriterionActiveModel {
                        scorecard_id: Set(scorecard_id),
                        criteria_number: Set(criterion.criteria_number),
                        criteria_name: Set(criterion.criteria_name.clone()),
                        max_score: Set(criterion.max_score),
                        score: Set(criterion.score),
                        weight_percent: Set(criterion.weight_percent),
                        comment: Set(criterion.comment.clone()),
                        order_index: Set(criterion.order_index),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| {
                        PortfolioSystemError::database_operation(format!(
                            "插入评分标准失败: {e}"
                        ))
                    })?;
                }
            }
        }

        let total_score = scoring::compute_total(&req.score_criteria);

        let mut active: ScorecardActiveModel = card.into();
        active.total_score = Set(total_score);
        active.general_comment = Set(req.general_comment.clone());
        active.update(&txn).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("更新评分卡失败: {e}"))
        })?;

        txn.commit().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("提交事务失败: {e}"))
        })?;

        self.load_scorecard(scorecard_id).await
    }

    pub(super) async fn get_scorecard_by_id_impl(
        &self,
        scorecard_id: i64,
    ) -> Result<Option<Scorecard>> {
        let card = Scorecards::find_by_id(scorecard_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分卡失败: {e}"))
            })?;

        match card {
            Some(card) => Ok(Some(self.attach_criteria(card).await?)),
            None => Ok(None),
        }
    }

    pub(super) async fn get_scorecard_by_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Scorecard>> {
        let card = Scorecards::find()
            .filter(ScorecardColumn::PortfolioSubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分卡失败: {e}"))
            })?;

        match card {
            Some(card) => Ok(Some(self.attach_criteria(card).await?)),
            None => Ok(None),
        }
    }

    async fn load_scorecard(&self, scorecard_id: i64) -> Result<Scorecard> {
        self.get_scorecard_by_id_impl(scorecard_id)
            .await?
            .ok_or_else(|| {
                PortfolioSystemError::not_found(format!("评分卡 {scorecard_id} 不存在"))
            })
    }

    async fn attach_criteria(&self, card: ScorecardModel) -> Result<Scorecard> {
        let criteria = ScoreCriteria::find()
            .filter(CriterionColumn::ScorecardId.eq(card.id))
            .order_by_asc(CriterionColumn::OrderIndex)
            .order_by_asc(CriterionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分标准失败: {e}"))
            })?;

        Ok(card.into_scorecard(criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scorecards::requests::ScoreCriterionPayload;
    use crate::storage::sea_orm_storage::test_support::{seed_user, storage};

    fn criterion(name: &str, score: f64, weight: f64) -> ScoreCriterionPayload {
        ScoreCriterionPayload {
            id: None,
            criteria_number: 1,
            criteria_name: name.to_string(),
            max_score: 100.0,
            score,
            weight_percent: weight,
            comment: None,
            order_index: 1,
        }
    }

    async fn seeded_scorecard(storage: &SeaOrmStorage) -> (i64, Scorecard) {
        let student = seed_user(storage, "student", "student").await;
        let teacher = seed_user(storage, "teacher", "teacher").await;
        let submission = storage.submit_portfolio_impl(1, student).await.unwrap();

        let card = storage
            .create_scorecard_impl(
                teacher,
                CreateScorecardRequest {
                    portfolio_submission_id: submission.id,
                    general_comment: Some("First pass".to_string()),
                    score_criteria: vec![
                        criterion("Technical Skills", 80.0, 50.0),
                        criterion("Presentation", 60.0, 50.0),
                    ],
                },
            )
            .await
            .unwrap();
        (submission.id, card)
    }

    #[tokio::test]
    async fn test_create_scorecard_computes_weighted_total() {
        let storage = storage().await;
        let (_, card) = seeded_scorecard(&storage).await;

        assert!((card.total_score - 70.0).abs() < f64::EPSILON);
        assert!((card.max_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(card.score_criteria.len(), 2);
    }

    #[tokio::test]
    async fn test_create_scorecard_rejects_missing_submission() {
        let storage = storage().await;
        let teacher = seed_user(&storage, "teacher", "teacher").await;

        let err = storage
            .create_scorecard_impl(
                teacher,
                CreateScorecardRequest {
                    portfolio_submission_id: 999,
                    general_comment: None,
                    score_criteria: vec![criterion("Anything", 50.0, 100.0)],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_update_reconciles_by_id() {
        let storage = storage().await;
        let (_, card) = seeded_scorecard(&storage).await;
        let first_id = card.score_criteria[0].id;

        // 更新第一条，新增一条；第二条不在载荷里
        let updated = storage
            .update_scorecard_impl(
                card.id,
                UpdateScorecardRequest {
                    general_comment: Some("Second pass".to_string()),
                    score_criteria: vec![
                        ScoreCriterionPayload {
                            id: Some(first_id),
                            score: 90.0,
                            ..criterion("Technical Skills", 90.0, 40.0)
                        },
                        criterion("Creativity", 70.0, 60.0),
                    ],
                },
            )
            .await
            .unwrap();

        // 既有条目更新 + 新条目插入 + 未提及条目保留
        assert_eq!(updated.score_criteria.len(), 3);
        let first = updated
            .score_criteria
            .iter()
            .find(|c| c.id == first_id)
            .unwrap();
        assert!((first.score - 90.0).abs() < f64::EPSILON);
        assert!((first.weight_percent - 40.0).abs() < f64::EPSILON);

        // 总分按载荷重算：90*0.4 + 70*0.6 = 78
        assert!((updated.total_score - 78.0).abs() < f64::EPSILON);
        assert_eq!(updated.general_comment.as_deref(), Some("Second pass"));
    }

    #[tokio::test]
    async fn test_update_ignores_foreign_criterion_id() {
        let storage = storage().await;
        let (_, card) = seeded_scorecard(&storage).await;

        // id 99999 不属于本卡，对账时忽略
        let updated = storage
            .update_scorecard_impl(
                card.id,
                UpdateScorecardRequest {
                    general_comment: None,
                    score_criteria: vec![ScoreCriterionPayload {
                        id: Some(99999),
                        ..criterion("Phantom", 10.0, 100.0)
                    }],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.score_criteria.len(), 2);
        assert!(!updated.score_criteria.iter().any(|c| c.criteria_name == "Phantom"));
    }

    #[tokio::test]
    async fn test_update_missing_scorecard() {
        let storage = storage().await;
        let err = storage
            .update_scorecard_impl(
                999,
                UpdateScorecardRequest {
                    general_comment: None,
                    score_criteria: vec![],
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_get_by_submission() {
        let storage = storage().await;
        let (submission_id, card) = seeded_scorecard(&storage).await;

        let found = storage
            .get_scorecard_by_submission_impl(submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, card.id);
        assert!(storage
            .get_scorecard_by_submission_impl(999)
            .await
            .unwrap()
            .is_none());
    }
}
