//! 通知实现

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{PortfolioSystemError, Result};
use crate::models::common::pagination::PaginationInfo;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::requests::{CreateNotificationRequest, NotificationListQuery};
use crate::models::notifications::responses::NotificationListResponse;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::notifications::Column as NotificationColumn;

impl SeaOrmStorage {
    pub(super) async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        let notification = NotificationActiveModel {
            user_id: Set(req.user_id),
            title: Set(req.title),
            message: Set(req.message),
            notification_type: Set(req.notification_type),
            announcement_id: Set(req.announcement_id),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| PortfolioSystemError::database_operation(format!("插入通知失败: {e}")))?;

        Ok(notification.into_notification())
    }

    /// 用户通知列表，新的在前，支持仅未读过滤
    pub(super) async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let page = query.pagination.page.max(1);
        let page_size = query.pagination.size.clamp(1, 100);

        let mut finder = Notifications::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .order_by_desc(NotificationColumn::CreatedAt)
            .order_by_desc(NotificationColumn::Id);

        if query.unread_only.unwrap_or(false) {
            finder = finder.filter(NotificationColumn::IsRead.eq(false));
        }

        let paginator = finder.paginate(&self.db, page_size as u64);
        let total = paginator.num_items().await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("统计通知数量失败: {e}"))
        })? as i64;
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };

        let items = paginator
            .fetch_page((page - 1) as u64)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询通知列表失败: {e}"))
            })?
            .into_iter()
            .map(|n| n.into_notification())
            .collect();

        Ok(NotificationListResponse {
            items,
            pagination: PaginationInfo {
                page,
                page_size,
                total,
                total_pages,
            },
        })
    }

    pub(super) async fn get_notification_by_id_impl(
        &self,
        notification_id: i64,
    ) -> Result<Option<Notification>> {
        let notification = Notifications::find_by_id(notification_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询通知失败: {e}"))
            })?;

        Ok(notification.map(|n| n.into_notification()))
    }

    pub(super) async fn get_unread_notification_count_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .filter(NotificationColumn::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("统计未读通知失败: {e}"))
            })?;

        Ok(count as i64)
    }

    pub(super) async fn mark_notification_as_read_impl(
        &self,
        notification_id: i64,
    ) -> Result<bool> {
        let Some(notification) = Notifications::find_by_id(notification_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询通知失败: {e}"))
            })?
        else {
            return Ok(false);
        };

        if notification.is_read {
            return Ok(true);
        }

        let mut active: NotificationActiveModel = notification.into();
        active.is_read = Set(true);
        active.update(&self.db).await.map_err(|e| {
            PortfolioSystemError::database_operation(format!("标记通知已读失败: {e}"))
        })?;

        Ok(true)
    }

    /// 返回实际被标记的数量
    pub(super) async fn mark_all_notifications_as_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(NotificationColumn::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(NotificationColumn::UserId.eq(user_id))
            .filter(NotificationColumn::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("批量标记已读失败: {e}"))
            })?;

        Ok(result.rows_affected as i64)
    }

    pub(super) async fn delete_notification_impl(&self, notification_id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(notification_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("删除通知失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::pagination::PaginationQuery;
    use crate::storage::sea_orm_storage::test_support::{seed_user, storage};

    fn request(user_id: i64, title: &str) -> CreateNotificationRequest {
        CreateNotificationRequest {
            user_id,
            title: title.to_string(),
            message: "message body".to_string(),
            notification_type: "submission_update".to_string(),
            announcement_id: None,
        }
    }

    fn list_query(page: i64, size: i64, unread_only: Option<bool>) -> NotificationListQuery {
        NotificationListQuery {
            pagination: PaginationQuery { page, size },
            unread_only,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "alice", "student").await;

        for i in 1..=3 {
            storage
                .create_notification_impl(request(user_id, &format!("n{i}")))
                .await
                .unwrap();
        }

        let list = storage
            .list_notifications_with_pagination_impl(user_id, list_query(1, 10, None))
            .await
            .unwrap();
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.pagination.total, 3);
        // 新的在前
        assert_eq!(list.items[0].title, "n3");
        assert_eq!(list.items[2].title, "n1");
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_read() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "bob", "student").await;

        let first = storage
            .create_notification_impl(request(user_id, "first"))
            .await
            .unwrap();
        storage
            .create_notification_impl(request(user_id, "second"))
            .await
            .unwrap();

        assert_eq!(
            storage.get_unread_notification_count_impl(user_id).await.unwrap(),
            2
        );

        assert!(storage.mark_notification_as_read_impl(first.id).await.unwrap());
        assert_eq!(
            storage.get_unread_notification_count_impl(user_id).await.unwrap(),
            1
        );

        // 重复标记幂等
        assert!(storage.mark_notification_as_read_impl(first.id).await.unwrap());
        assert!(!storage.mark_notification_as_read_impl(999).await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_all_returns_affected_count() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "carol", "student").await;
        let other = seed_user(&storage, "dave", "student").await;

        storage.create_notification_impl(request(user_id, "a")).await.unwrap();
        storage.create_notification_impl(request(user_id, "b")).await.unwrap();
        storage.create_notification_impl(request(other, "c")).await.unwrap();

        let marked = storage
            .mark_all_notifications_as_read_impl(user_id)
            .await
            .unwrap();
        assert_eq!(marked, 2);

        // 其他用户不受影响
        assert_eq!(
            storage.get_unread_notification_count_impl(other).await.unwrap(),
            1
        );

        // 再次调用没有可标记的
        assert_eq!(
            storage.mark_all_notifications_as_read_impl(user_id).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_unread_only_filter() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "erin", "student").await;

        let first = storage
            .create_notification_impl(request(user_id, "read-me"))
            .await
            .unwrap();
        storage
            .create_notification_impl(request(user_id, "still-unread"))
            .await
            .unwrap();
        storage.mark_notification_as_read_impl(first.id).await.unwrap();

        let list = storage
            .list_notifications_with_pagination_impl(user_id, list_query(1, 10, Some(true)))
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].title, "still-unread");
    }

    #[tokio::test]
    async fn test_delete_notification() {
        let storage = storage().await;
        let user_id = seed_user(&storage, "frank", "student").await;
        let notification = storage
            .create_notification_impl(request(user_id, "gone"))
            .await
            .unwrap();

        assert!(storage.delete_notification_impl(notification.id).await.unwrap());
        assert!(!storage.delete_notification_impl(notification.id).await.unwrap());
    }
}
