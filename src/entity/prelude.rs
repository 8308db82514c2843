//! 预导入模块，方便使用

pub use super::feedbacks::{
    ActiveModel as FeedbackActiveModel, Entity as Feedbacks, Model as FeedbackModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::portfolio_submissions::{
    ActiveModel as PortfolioSubmissionActiveModel, Entity as PortfolioSubmissions,
    Model as PortfolioSubmissionModel,
};
pub use super::score_criteria::{
    ActiveModel as ScoreCriterionActiveModel, Entity as ScoreCriteria,
    Model as ScoreCriterionModel,
};
pub use super::scorecards::{
    ActiveModel as ScorecardActiveModel, Entity as Scorecards, Model as ScorecardModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
