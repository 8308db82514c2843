//! 业务模型定义
//!
//! 与 entity 模块中的数据库实体分离，面向 API 的请求/响应结构。

pub mod common;
pub mod feedbacks;
pub mod notifications;
pub mod scorecards;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行状态统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
