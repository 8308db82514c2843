//! WebSocket 握手路由
//!
//! 浏览器的 WebSocket API 无法携带自定义请求头，
//! 令牌通过查询参数传递：GET /api/v1/ws?token=<access_token>

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;

use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::websocket::WebSocketService;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: String,
}

// WebSocket 握手
pub async fn ws_handshake(
    req: HttpRequest,
    query: web::Query<WsQuery>,
    body: web::Payload,
) -> ActixResult<HttpResponse> {
    // 查询参数中的令牌走与中间件相同的验证路径
    let claims = match JwtUtils::verify_access_token(&query.token) {
        Ok(claims) => claims,
        Err(err) => {
            info!("WebSocket handshake rejected: {}", err);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid token",
            )));
        }
    };

    let user_id = match claims.user_id() {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid token",
            )));
        }
    };

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "User not found or inactive",
            )));
        }
        Err(e) => {
            return Ok(crate::services::storage_error_response(e));
        }
    };

    let (response, session, stream) = actix_ws::handle(&req, body)?;

    // 每个连接一个长生命周期任务
    actix_web::rt::spawn(WebSocketService::handle_connection(user.id, session, stream));

    Ok(response)
}

// 配置路由
pub fn configure_ws_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/ws", web::get().to(ws_handshake));
}
