//! 评语实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedbacks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub portfolio_submission_id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub overall_comment: String,
    #[sea_orm(column_type = "Text")]
    pub strengths: String,
    #[sea_orm(column_type = "Text")]
    pub areas_for_improvement: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portfolio_submissions::Entity",
        from = "Column::PortfolioSubmissionId",
        to = "super::portfolio_submissions::Column::Id"
    )]
    PortfolioSubmission,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Reviewer,
}

impl Related<super::portfolio_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioSubmission.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_feedback(self) -> crate::models::feedbacks::entities::Feedback {
        use chrono::{DateTime, Utc};

        crate::models::feedbacks::entities::Feedback {
            id: self.id,
            portfolio_submission_id: self.portfolio_submission_id,
            user_id: self.user_id,
            overall_comment: self.overall_comment,
            strengths: self.strengths,
            areas_for_improvement: self.areas_for_improvement,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
