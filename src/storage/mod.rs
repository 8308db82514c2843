use std::sync::Arc;

use crate::models::{
    feedbacks::{entities::Feedback, requests::UpdateFeedbackRequest},
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
    scorecards::{
        entities::Scorecard,
        requests::{CreateScorecardRequest, ScorecardPayload, UpdateScorecardRequest},
    },
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::FeedbackPayload,
    },
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户查询方法（只消费用户，不提供用户 CRUD）
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 列出所有学生（广播受众）
    async fn list_students(&self) -> Result<Vec<User>>;

    /// 提交生命周期方法
    // 提交作品集：计算下一版本号并翻转 current 标记，单事务完成
    async fn submit_portfolio(&self, portfolio_id: i64, user_id: i64) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取谱系当前提交
    async fn get_current_submission(
        &self,
        portfolio_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出所有提交
    async fn list_submissions(&self) -> Result<Vec<Submission>>;
    // 列出某作品集的提交历史（新版本在前）
    async fn list_submissions_by_portfolio(&self, portfolio_id: i64) -> Result<Vec<Submission>>;
    // 按状态列出提交
    async fn list_submissions_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>>;
    // 待审核队列（awaiting_review，先提交先审核）
    async fn list_pending_submissions(&self) -> Result<Vec<Submission>>;
    // 标记已审阅
    async fn mark_submission_reviewed(&self, submission_id: i64) -> Result<Submission>;
    // 标记已批准（必须已有评分卡）
    async fn mark_submission_approved(&self, submission_id: i64) -> Result<Submission>;
    // 管理员直接改状态（不校验状态机）
    async fn update_submission_status(
        &self,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission>;
    // 管理员删除提交
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;
    // 批准并附带评分卡：评分卡 + 评分标准 + 评语 + 状态变更，单事务完成
    async fn approve_with_scorecard(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        scorecard: ScorecardPayload,
        feedback: FeedbackPayload,
    ) -> Result<Submission>;

    /// 评分卡方法
    // 创建评分卡（含评分标准，单事务）
    async fn create_scorecard(
        &self,
        reviewer_id: i64,
        req: CreateScorecardRequest,
    ) -> Result<Scorecard>;
    // 更新评分卡（条目按 ID 对账：无 ID 新建，本卡 ID 更新，外卡 ID 忽略）
    async fn update_scorecard(
        &self,
        scorecard_id: i64,
        req: UpdateScorecardRequest,
    ) -> Result<Scorecard>;
    // 通过ID获取评分卡
    async fn get_scorecard_by_id(&self, scorecard_id: i64) -> Result<Option<Scorecard>>;
    // 获取提交的评分卡
    async fn get_scorecard_by_submission(&self, submission_id: i64) -> Result<Option<Scorecard>>;

    /// 评语方法
    // 通过ID获取评语
    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>>;
    // 获取提交的评语
    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>>;
    // 更新评语
    async fn update_feedback(
        &self,
        feedback_id: i64,
        req: UpdateFeedbackRequest,
    ) -> Result<Option<Feedback>>;

    /// 通知方法
    // 创建单条通知
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification>;
    // 列出用户通知（新的在前，分页）
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse>;
    // 通过ID获取通知
    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>>;
    // 获取未读数量
    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64>;
    // 标记已读
    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool>;
    // 全部标记已读
    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64>;
    // 删除通知
    async fn delete_notification(&self, notification_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
