use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误代码
///
/// 前三位与 HTTP 状态码对应，后两位区分具体业务场景。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/api.ts")]
pub enum ErrorCode {
    Success = 200,

    // 400 参数错误
    BadRequest = 40000,
    ValidationFailed = 40001,

    // 401 / 403 认证授权
    Unauthorized = 40100,
    Forbidden = 40300,

    // 404 资源不存在
    NotFound = 40400,
    SubmissionNotFound = 40401,
    ScorecardNotFound = 40402,
    FeedbackNotFound = 40403,
    NotificationNotFound = 40404,

    // 409 业务冲突
    Conflict = 40900,
    SubmissionAlreadyUnderReview = 40901,

    // 412 前置条件不满足
    PreconditionFailed = 41200,
    ScorecardRequired = 41201,

    // 500 服务器错误
    InternalServerError = 50000,
}
