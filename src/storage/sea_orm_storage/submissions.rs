//! 提交生命周期实现
//!
//! 版本化重提交与批准打包均为单事务：要么全部生效，要么全部回滚。

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{PortfolioSystemError, Result};
use crate::models::scorecards::requests::ScorecardPayload;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::submissions::requests::FeedbackPayload;
use crate::utils::scoring;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entity::portfolio_submissions::Column as SubmissionColumn;

impl SeaOrmStorage {
    /// 提交作品集
    ///
    /// 每次提交插入一条新行：版本号单调递增，当前标记在同一事务内
    /// 从旧版本翻转到新版本。谱系中已有提交且状态不是
    /// revision_requested 时拒绝。
    pub(super) async fn submit_portfolio_impl(
        &self,
        portfolio_id: i64,
        user_id: i64,
    ) -> Result<Submission> {
        let txn = self.db.begin().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        // 检查当前版本：只有 revision_requested 允许重新提交。
        // 行锁串行化同一谱系的并发重提交；首次提交没有可锁的行，
        // 由 (portfolio_id, user_id, version) 唯一索引兜底。
        let current = PortfolioSubmissions::find()
            .filter(SubmissionColumn::PortfolioId.eq(portfolio_id))
            .filter(SubmissionColumn::UserId.eq(user_id))
            .filter(SubmissionColumn::IsCurrentVersion.eq(true))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询当前提交失败: {e}"))
            })?;

        if let Some(ref cur) = current
            && cur.status != SubmissionStatus::REVISION_REQUESTED
        {
            return Err(PortfolioSystemError::conflict(format!(
                "作品集已提交且处于 {} 状态，只有 revision_requested 允许重新提交",
                cur.status
            )));
        }

        // 下一版本号 = 谱系最大版本 + 1
        let max_version: Option<Option<i32>> = PortfolioSubmissions::find()
            .select_only()
            .column_as(SubmissionColumn::Version.max(), "max_version")
            .filter(SubmissionColumn::PortfolioId.eq(portfolio_id))
            .filter(SubmissionColumn::UserId.eq(user_id))
            .into_tuple()
            .one(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询最大版本号失败: {e}"))
            })?;
        let next_version = max_version.flatten().unwrap_or(0) + 1;

        // 旧版本让位
        if let Some(cur) = current {
            let mut active: PortfolioSubmissionActiveModel = cur.into();
            active.is_current_version = Set(false);
            active.update(&txn).await.map_err(|e| {
                PortfolioSystemError::database_operation(format!("更新旧版本标记失败: {e}"))
            })?;
        }

        let new_submission = PortfolioSubmissionActiveModel {
            portfolio_id: Set(portfolio_id),
            user_id: Set(user_id),
            version: Set(next_version),
            status: Set(SubmissionStatus::AWAITING_REVIEW.to_string()),
            is_current_version: Set(true),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            reviewed_at: Set(None),
            approved_at: Set(None),
            ..Default::default()
        };

        let inserted = new_submission.insert(&txn).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("插入提交失败: {e}"))
        })?;

        txn.commit().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("提交事务失败: {e}"))
        })?;

        info!(
            "Portfolio {} submitted by user {} as version {}",
            portfolio_id, user_id, next_version
        );

        Ok(inserted.into_submission())
    }

    pub(super) async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let submission = PortfolioSubmissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交失败: {e}"))
            })?;

        Ok(submission.map(|s| s.into_submission()))
    }

    pub(super) async fn get_current_submission_impl(
        &self,
        portfolio_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        let submission = PortfolioSubmissions::find()
            .filter(SubmissionColumn::PortfolioId.eq(portfolio_id))
            .filter(SubmissionColumn::UserId.eq(user_id))
            .filter(SubmissionColumn::IsCurrentVersion.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询当前提交失败: {e}"))
            })?;

        Ok(submission.map(|s| s.into_submission()))
    }

    pub(super) async fn list_submissions_impl(&self) -> Result<Vec<Submission>> {
        let submissions = PortfolioSubmissions::find()
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交列表失败: {e}"))
            })?;

        Ok(submissions.into_iter().map(|s| s.into_submission()).collect())
    }

    /// 某作品集的完整版本历史，新版本在前
    pub(super) async fn list_submissions_by_portfolio_impl(
        &self,
        portfolio_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = PortfolioSubmissions::find()
            .filter(SubmissionColumn::PortfolioId.eq(portfolio_id))
            .order_by_desc(SubmissionColumn::Version)
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交历史失败: {e}"))
            })?;

        Ok(submissions.into_iter().map(|s| s.into_submission()).collect())
    }

    pub(super) async fn list_submissions_by_status_impl(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        let submissions = PortfolioSubmissions::find()
            .filter(SubmissionColumn::Status.eq(status.to_string()))
            .order_by_desc(SubmissionColumn::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("按状态查询提交失败: {e}"))
            })?;

        Ok(submissions.into_iter().map(|s| s.into_submission()).collect())
    }

    /// 待审核队列：awaiting_review 的当前版本，先提交的先审核
    pub(super) async fn list_pending_submissions_impl(&self) -> Result<Vec<Submission>> {
        let submissions = PortfolioSubmissions::find()
            .filter(SubmissionColumn::Status.eq(SubmissionStatus::AWAITING_REVIEW))
            .filter(SubmissionColumn::IsCurrentVersion.eq(true))
            .order_by_asc(SubmissionColumn::SubmittedAt)
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询待审核队列失败: {e}"))
            })?;

        Ok(submissions.into_iter().map(|s| s.into_submission()).collect())
    }

    pub(super) async fn mark_submission_reviewed_impl(
        &self,
        submission_id: i64,
    ) -> Result<Submission> {
        let submission = self.require_submission(submission_id).await?;

        let mut active: PortfolioSubmissionActiveModel = submission.into();
        active.status = Set(SubmissionStatus::REVIEWED.to_string());
        active.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));

        let updated = active.update(&self.db).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("标记已审阅失败: {e}"))
        })?;

        Ok(updated.into_submission())
    }

    /// 标记已批准。前置条件：该提交必须已有评分卡。
    pub(super) async fn mark_submission_approved_impl(
        &self,
        submission_id: i64,
    ) -> Result<Submission> {
        let submission = self.require_submission(submission_id).await?;

        let has_scorecard = Scorecards::find()
            .filter(crate::entity::scorecards::Column::PortfolioSubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询评分卡失败: {e}"))
            })?
            .is_some();

        if !has_scorecard {
            return Err(PortfolioSystemError::precondition_failed(
                "cannot approve without scorecard",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let mut active: PortfolioSubmissionActiveModel = submission.into();
        active.status = Set(SubmissionStatus::APPROVED.to_string());
        active.reviewed_at = Set(Some(now));
        active.approved_at = Set(Some(now));

        let updated = active.update(&self.db).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("标记已批准失败: {e}"))
        })?;

        Ok(updated.into_submission())
    }

    /// 管理员直接设置状态，不走状态机校验
    pub(super) async fn update_submission_status_impl(
        &self,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        let submission = self.require_submission(submission_id).await?;

        let mut active: PortfolioSubmissionActiveModel = submission.into();
        active.status = Set(status.to_string());

        let updated = active.update(&self.db).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("更新提交状态失败: {e}"))
        })?;

        Ok(updated.into_submission())
    }

    pub(super) async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = PortfolioSubmissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("删除提交失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 批准并附带评分卡
    ///
    /// 评分卡、评分标准、评语和状态变更写在同一事务里，
    /// 任何一步失败都不会留下部分制品。
    pub(super) async fn approve_with_scorecard_impl(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        scorecard: ScorecardPayload,
        feedback: FeedbackPayload,
    ) -> Result<Submission> {
        let txn = self.db.begin().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("开启事务失败: {e}"))
        })?;

        let submission = PortfolioSubmissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交失败: {e}"))
            })?
            .ok_or_else(|| {
                PortfolioSystemError::not_found(format!("提交 {submission_id} 不存在"))
            })?;

        let now = chrono::Utc::now().timestamp();
        let total_score = scoring::compute_total(&scorecard.score_criteria);

        let card = ScorecardActiveModel {
            portfolio_submission_id: Set(submission_id),
            user_id: Set(reviewer_id),
            total_score: Set(total_score),
            max_score: Set(scoring::MAX_SCORE),
            general_comment: Set(scorecard.general_comment.clone()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            PortfolioSystemError::database_operation(format!("插入评分卡失败: {e}"))
        })?;

        for criterion in &scorecard.score_criteria {
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

        FeedbackActiveModel {
            portfolio_submission_id: Set(submission_id),
            user_id: Set(reviewer_id),
            overall_comment: Set(feedback.overall_comment),
            strengths: Set(feedback.strengths),
            areas_for_improvement: Set(feedback.areas_for_improvement),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            PortfolioSystemError::database_operation(format!("插入评语失败: {e}"))
        })?;

        let mut active: PortfolioSubmissionActiveModel = submission.into();
        active.status = Set(SubmissionStatus::APPROVED.to_string());
        active.reviewed_at = Set(Some(now));
        active.approved_at = Set(Some(now));
        let updated = active.update(&txn).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("更新提交状态失败: {e}"))
        })?;

        txn.commit().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("提交事务失败: {e}"))
        })?;

        info!(
            "Submission {} approved with scorecard {} (total {:.2})",
            submission_id, card.id, total_score
        );

        Ok(updated.into_submission())
    }

    async fn require_submission(
        &self,
        submission_id: i64,
    ) -> Result<crate::entity::portfolio_submissions::Model> {
        PortfolioSubmissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询提交失败: {e}"))
            })?
            .ok_or_else(|| {
                PortfolioSystemError::not_found(format!("提交 {submission_id} 不存在"))
            })
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

    fn scorecard_payload() -> ScorecardPayload {
        ScorecardPayload {
            general_comment: Some("Solid work".to_string()),
            score_criteria: vec![
                criterion("Technical Skills", 80.0, 50.0),
                criterion("Presentation", 60.0, 50.0),
            ],
        }
    }

    fn feedback_payload() -> FeedbackPayload {
        FeedbackPayload {
            overall_comment: "Well organized portfolio".to_string(),
            strengths: "Clear narrative".to_string(),
            areas_for_improvement: "Add more projects".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_submission_is_version_one() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "alice", "student").await;

        let submission = storage.submit_portfolio_impl(1, user_id).await.unwrap();

        assert_eq!(submission.version, 1);
        assert!(submission.is_current_version);
        assert_eq!(submission.status, SubmissionStatus::AwaitingReview);
    }

    #[tokio::test]
    async fn test_resubmission_requires_revision_requested() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "bob", "student").await;

        storage.submit_portfolio_impl(1, user_id).await.unwrap();

        // awaiting_review 状态下重新提交必须被拒绝
        let err = storage.submit_portfolio_impl(1, user_id).await.unwrap_err();
        assert_eq!(err.code(), "E006");

        // 拒绝之后谱系没有被破坏
        let current = storage
            .get_current_submission_impl(1, user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.version, 1);
    }

    #[tokio::test]
    async fn test_resubmission_flips_current_and_bumps_version() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "carol", "student").await;

        let first = storage.submit_portfolio_impl(1, user_id).await.unwrap();
        storage
            .update_submission_status_impl(first.id, SubmissionStatus::RevisionRequested)
            .await
            .unwrap();

        let second = storage.submit_portfolio_impl(1, user_id).await.unwrap();
        assert_eq!(second.version, 2);
        assert!(second.is_current_version);

        // 谱系中只有一个当前版本
        let history = storage.list_submissions_by_portfolio_impl(1).await.unwrap();
        assert_eq!(history.len(), 2);
        let current_count = history.iter().filter(|s| s.is_current_version).count();
        assert_eq!(current_count, 1);
        assert_eq!(history[0].version, 2);

        // 旧版本保留完整状态
        let old = storage
            .get_submission_by_id_impl(first.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!old.is_current_version);
        assert_eq!(old.status, SubmissionStatus::RevisionRequested);
    }

    #[tokio::test]
    async fn test_version_never_reused_after_delete() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "dave", "student").await;

        let first = storage.submit_portfolio_impl(1, user_id).await.unwrap();
        storage
            .update_submission_status_impl(first.id, SubmissionStatus::RevisionRequested)
            .await
            .unwrap();
        let second = storage.submit_portfolio_impl(1, user_id).await.unwrap();
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn test_pending_queue_is_fifo() {
        let storage = storage().await;
        let alice = seed_user(&storage, "alice", "student").await;
        let bob = seed_user(&storage, "bob", "student").await;

        let first = storage.submit_portfolio_impl(1, alice).await.unwrap();
        let second = storage.submit_portfolio_impl(2, bob).await.unwrap();

        let pending = storage.list_pending_submissions_impl().await.unwrap();
        assert_eq!(pending.len(), 2);
        // 先提交的在前
        assert_eq!(pending[0].id, first.id);
        assert_eq!(pending[1].id, second.id);
    }

    #[tokio::test]
    async fn test_approve_requires_scorecard() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "erin", "student").await;
        let submission = storage.submit_portfolio_impl(1, user_id).await.unwrap();

        let err = storage
            .mark_submission_approved_impl(submission.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        // 状态未被改动
        let unchanged = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::AwaitingReview);
        assert!(unchanged.approved_at.is_none());
    }

    #[tokio::test]
    async fn test_mark_reviewed_sets_timestamp() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "frank", "student").await;
        let submission = storage.submit_portfolio_impl(1, user_id).await.unwrap();

        let reviewed = storage
            .mark_submission_reviewed_impl(submission.id)
            .await
            .unwrap();
        assert_eq!(reviewed.status, SubmissionStatus::Reviewed);
        assert!(reviewed.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_approve_with_scorecard_creates_all_artifacts() {
        let storage = storage().await;
        let student = seed_user(&storage, "grace", "student").await;
        let teacher = seed_user(&storage, "prof", "teacher").await;
        let submission = storage.submit_portfolio_impl(1, student).await.unwrap();

        let approved = storage
            .approve_with_scorecard_impl(
                submission.id,
                teacher,
                scorecard_payload(),
                feedback_payload(),
            )
            .await
            .unwrap();

        assert_eq!(approved.status, SubmissionStatus::Approved);
        assert!(approved.approved_at.is_some());

        let card = storage
            .get_scorecard_by_submission_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        // 80*0.5 + 60*0.5 = 70
        assert!((card.total_score - 70.0).abs() < f64::EPSILON);
        assert_eq!(card.score_criteria.len(), 2);
        assert_eq!(card.user_id, teacher);

        let feedback = storage
            .get_feedback_by_submission_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(feedback.overall_comment, "Well organized portfolio");
    }

    #[tokio::test]
    async fn test_approve_with_scorecard_missing_submission_leaves_nothing() {
        let storage = storage().await;
        let teacher = seed_user(&storage, "prof", "teacher").await;

        let err = storage
            .approve_with_scorecard_impl(999, teacher, scorecard_payload(), feedback_payload())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        // 事务回滚，没有留下评分卡或评语
        assert!(storage
            .get_scorecard_by_submission_impl(999)
            .await
            .unwrap()
            .is_none());
        assert!(storage
            .get_feedback_by_submission_impl(999)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_submission() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "henry", "student").await;
        let submission = storage.submit_portfolio_impl(1, user_id).await.unwrap();

        assert!(storage.delete_submission_impl(submission.id).await.unwrap());
        assert!(!storage.delete_submission_impl(submission.id).await.unwrap());
        assert!(storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .is_none());
    }

    // 并发提交的兜底：同一谱系内版本号重复被唯一索引拒绝
    #[tokio::test]
    async fn test_duplicate_version_rejected_by_unique_index() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "iris", "student").await;
        let first = storage.submit_portfolio_impl(1, user_id).await.unwrap();

        let duplicate = PortfolioSubmissionActiveModel {
            portfolio_id: Set(1),
            user_id: Set(user_id),
            version: Set(first.version),
            status: Set(SubmissionStatus::AWAITING_REVIEW.to_string()),
            is_current_version: Set(true),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            reviewed_at: Set(None),
            approved_at: Set(None),
            ..Default::default()
        };
        assert!(duplicate.insert(&storage.db).await.is_err());
    }

    // 中途失败回滚：第二条评分标准违反权重约束，
    // 不留下评分卡、评分标准或评语，提交状态不变
    #[tokio::test]
    async fn test_approve_with_scorecard_mid_sequence_failure_rolls_back() {
        let storage = storage().await;
        let student = seed_user(&storage, "jack", "student").await;
        let teacher = seed_user(&storage, "prof_k", "teacher").await;
        let submission = storage.submit_portfolio_impl(1, student).await.unwrap();

        // 第一条合法，第二条权重超出 0-100 触发数据库约束
        let payload = ScorecardPayload {
            general_comment: None,
            score_criteria: vec![
                criterion("Technical Skills", 80.0, 30.0),
                criterion("Presentation", 60.0, 150.0),
            ],
        };

        let err = storage
            .approve_with_scorecard_impl(submission.id, teacher, payload, feedback_payload())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        assert!(storage
            .get_scorecard_by_submission_impl(submission.id)
            .await
            .unwrap()
            .is_none());
        assert!(storage
            .get_feedback_by_submission_impl(submission.id)
            .await
            .unwrap()
            .is_none());

        let unchanged = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, SubmissionStatus::AwaitingReview);
        assert!(unchanged.reviewed_at.is_none());
        assert!(unchanged.approved_at.is_none());
    }
}
