pub mod feedbacks;
pub mod notifications;
pub mod scorecards;
pub mod submissions;
pub mod ws;

pub use feedbacks::configure_feedbacks_routes;
pub use notifications::configure_notifications_routes;
pub use scorecards::configure_scorecards_routes;
pub use submissions::configure_submissions_routes;
pub use ws::configure_ws_routes;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：要求评审角色（教师或管理员），返回用户 ID
pub(crate) fn require_reviewer(req: &HttpRequest) -> Result<i64, HttpResponse> {
    require_any_role(req, UserRole::reviewer_roles(), "需要评审权限")
}

// 辅助函数：要求管理员角色，返回用户 ID
pub(crate) fn require_admin(req: &HttpRequest) -> Result<i64, HttpResponse> {
    require_any_role(req, UserRole::admin_roles(), "需要管理员权限")
}

fn require_any_role(
    req: &HttpRequest,
    roles: &[&UserRole],
    denied_message: &str,
) -> Result<i64, HttpResponse> {
    let user = RequireJWT::extract_user_claims(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })?;

    if roles.contains(&&user.role) {
        Ok(user.id)
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            denied_message,
        )))
    }
}
