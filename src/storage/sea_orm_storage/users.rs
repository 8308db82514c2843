//! 用户查询实现
//!
//! 用户的创建和维护不在本服务范围内，这里只做读取。

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::errors::{PortfolioSystemError, Result};
use crate::models::users::entities::{User, UserRole};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    pub(super) async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortfolioSystemError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(user.map(|u| u.into_user()))
    }

    /// 广播受众：所有状态为 active 的学生
    pub(super) async fn list_students_impl(&self) -> Result<Vec<User>> {
        let users = Users::find()
            .filter(crate::entity::users::Column::Role.eq(UserRole::STUDENT))
            .filter(crate::entity::users::Column::Status.eq("active"))
            .all(&self.db)
            .await
            .map_err(|e| {
                PortfolioSystemError::database_operation(format!("查询学生列表失败: {e}"))
            })?;

        Ok(users.into_iter().map(|u| u.into_user()).collect())
    }
}
