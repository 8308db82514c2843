//! 评分标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "score_criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub scorecard_id: i64,
    pub criteria_number: i32,
    pub criteria_name: String,
    pub max_score: f64,
    pub score: f64,
    pub weight_percent: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub order_index: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scorecards::Entity",
        from = "Column::ScorecardId",
        to = "super::scorecards::Column::Id"
    )]
    Scorecard,
}

impl Related<super::scorecards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scorecard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_criterion(self) -> crate::models::scorecards::entities::ScoreCriterion {
        crate::models::scorecards::entities::ScoreCriterion {
            id: self.id,
            scorecard_id: self.scorecard_id,
            criteria_number: self.criteria_number,
            criteria_name: self.criteria_name,
            max_score: self.max_score,
            score: self.score,
            weight_percent: self.weight_percent,
            comment: self.comment,
            order_index: self.order_index,
        }
    }
}
