//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod feedbacks;
mod notifications;
mod scorecards;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{PortfolioSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url, config.database.pool_size, config.database.timeout)
            .await
    }

    /// 从指定 URL 创建存储实例（测试也走这里）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortfolioSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortfolioSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| PortfolioSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortfolioSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortfolioSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn list_students(&self) -> Result<Vec<User>> {
        self.list_students_impl().await
    }

    // 提交模块
    async fn submit_portfolio(&self, portfolio_id: i64, user_id: i64) -> Result<Submission> {
        self.submit_portfolio_impl(portfolio_id, user_id).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_current_submission(
        &self,
        portfolio_id: i64,
        user_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_current_submission_impl(portfolio_id, user_id)
            .await
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        self.list_submissions_impl().await
    }

    async fn list_submissions_by_portfolio(&self, portfolio_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_portfolio_impl(portfolio_id).await
    }

    async fn list_submissions_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_status_impl(status).await
    }

    async fn list_pending_submissions(&self) -> Result<Vec<Submission>> {
        self.list_pending_submissions_impl().await
    }

    async fn mark_submission_reviewed(&self, submission_id: i64) -> Result<Submission> {
        self.mark_submission_reviewed_impl(submission_id).await
    }

    async fn mark_submission_approved(&self, submission_id: i64) -> Result<Submission> {
        self.mark_submission_approved_impl(submission_id).await
    }

    async fn update_submission_status(
        &self,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        self.update_submission_status_impl(submission_id, status)
            .await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }

    async fn approve_with_scorecard(
        &self,
        submission_id: i64,
        reviewer_id: i64,
        scorecard: ScorecardPayload,
        feedback: FeedbackPayload,
    ) -> Result<Submission> {
        self.approve_with_scorecard_impl(submission_id, reviewer_id, scorecard, feedback)
            .await
    }

    // 评分卡模块
    async fn create_scorecard(
        &self,
        reviewer_id: i64,
        req: CreateScorecardRequest,
    ) -> Result<Scorecard> {
        self.create_scorecard_impl(reviewer_id, req).await
    }

    async fn update_scorecard(
        &self,
        scorecard_id: i64,
        req: UpdateScorecardRequest,
    ) -> Result<Scorecard> {
        self.update_scorecard_impl(scorecard_id, req).await
    }

    async fn get_scorecard_by_id(&self, scorecard_id: i64) -> Result<Option<Scorecard>> {
        self.get_scorecard_by_id_impl(scorecard_id).await
    }

    async fn get_scorecard_by_submission(&self, submission_id: i64) -> Result<Option<Scorecard>> {
        self.get_scorecard_by_submission_impl(submission_id).await
    }

    // 评语模块
    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(feedback_id).await
    }

    async fn get_feedback_by_submission(&self, submission_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_submission_impl(submission_id).await
    }

    async fn update_feedback(
        &self,
        feedback_id: i64,
        req: UpdateFeedbackRequest,
    ) -> Result<Option<Feedback>> {
        self.update_feedback_impl(feedback_id, req).await
    }

    // 通知模块
    async fn create_notification(&self, req: CreateNotificationRequest) -> Result<Notification> {
        self.create_notification_impl(req).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, query)
            .await
    }

    async fn get_notification_by_id(&self, notification_id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(notification_id).await
    }

    async fn get_unread_notification_count(&self, user_id: i64) -> Result<i64> {
        self.get_unread_notification_count_impl(user_id).await
    }

    async fn mark_notification_as_read(&self, notification_id: i64) -> Result<bool> {
        self.mark_notification_as_read_impl(notification_id).await
    }

    async fn mark_all_notifications_as_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_as_read_impl(user_id).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<bool> {
        self.delete_notification_impl(notification_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::entity::users::ActiveModel as UserActiveModel;
    use sea_orm::{ActiveModelTrait, Set};

    /// 基于内存 SQLite 的存储实例，已应用迁移
    pub async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::new_with_url("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory storage should initialize")
    }

    /// 插入一个用户并返回 ID
    pub async fn seed_user(storage: &SeaOrmStorage, username: &str, role: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = UserActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            role: Set(role.to_string()),
            status: Set("active".to_string()),
            profile_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let user = model
            .insert(&storage.db)
            .await
            .expect("user seed should insert");
        user.id
    }
}
