//! 评分卡实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scorecards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub portfolio_submission_id: i64,
    pub user_id: i64,
    pub total_score: f64,
    pub max_score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub general_comment: Option<String>,
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
    #[sea_orm(has_many = "super::score_criteria::Entity")]
    ScoreCriteria,
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

impl Related<super::score_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScoreCriteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（criteria 由调用方单独查出）
impl Model {
    pub fn into_scorecard(
        self,
        criteria: Vec<super::score_criteria::Model>,
    ) -> crate::models::scorecards::entities::Scorecard {
        use chrono::{DateTime, Utc};

        crate::models::scorecards::entities::Scorecard {
            id: self.id,
            portfolio_submission_id: self.portfolio_submission_id,
            user_id: self.user_id,
            total_score: self.total_score,
            max_score: self.max_score,
            general_comment: self.general_comment,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            score_criteria: criteria.into_iter().map(|c| c.into_criterion()).collect(),
        }
    }
}
