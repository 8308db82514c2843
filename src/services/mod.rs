pub mod feedbacks;
pub mod notifications;
pub mod scorecards;
pub mod submissions;
pub mod websocket;

pub use feedbacks::FeedbackService;
pub use notifications::NotificationService;
pub use scorecards::ScorecardService;
pub use submissions::SubmissionService;

use actix_web::HttpResponse;

use crate::errors::PortfolioSystemError;
use crate::models::{ApiResponse, ErrorCode};

/// 将存储层错误映射为统一的 HTTP 响应
pub(crate) fn storage_error_response(err: PortfolioSystemError) -> HttpResponse {
    match err {
        PortfolioSystemError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                msg,
            ))
        }
        PortfolioSystemError::Authentication(msg) => {
            HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                msg,
            ))
        }
        PortfolioSystemError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        PortfolioSystemError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        PortfolioSystemError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyUnderReview,
                msg,
            ))
        }
        PortfolioSystemError::PreconditionFailed(msg) => {
            HttpResponse::PreconditionFailed().json(ApiResponse::error_empty(
                ErrorCode::ScorecardRequired,
                msg,
            ))
        }
        other => {
            tracing::error!("Storage error: {}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "内部服务错误",
            ))
        }
    }
}
