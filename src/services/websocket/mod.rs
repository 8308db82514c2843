/*!
 * WebSocket 实时通知服务
 *
 * 建立 WebSocket 连接，实时推送通知给在线用户。
 *
 * ## 使用方法
 *
 * 客户端通过以下 URL 连接：
 * ```text
 * ws://host/api/v1/ws?token=<access_token>
 * ```
 *
 * ## 消息格式
 *
 * ### 服务端推送
 * ```json
 * {
 *     "type": "notification",
 *     "payload": {
 *         "id": 42,
 *         "notification_type": "submission_approved",
 *         "title": "作品集已通过",
 *         "message": "您的作品集已通过审核",
 *         "announcement_id": null,
 *         "created_at": "2026-08-28T12:00:00Z"
 *     }
 * }
 * ```
 *
 * ### 心跳
 * ```json
 * {"type": "ping"}
 * {"type": "pong"}
 * ```
 */

use actix_ws::Message;
use dashmap::DashMap;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::notifications::entities::Notification;

/// 全局连接注册表
static CONNECTION_REGISTRY: Lazy<InMemoryRegistry> = Lazy::new(InMemoryRegistry::new);

/// WebSocket 消息类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// 通知消息
    Notification { payload: NotificationPayload },
    /// 心跳请求
    Ping,
    /// 心跳响应
    Pong,
    /// 连接成功
    Connected { user_id: i64 },
    /// 错误消息
    Error { message: String },
}

/// 通知载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub id: i64,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub announcement_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notification> for NotificationPayload {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            notification_type: n.notification_type,
            title: n.title,
            message: n.message,
            announcement_id: n.announcement_id,
            created_at: n.created_at,
        }
    }
}

/// 连接注册表抽象
///
/// 通知投递只依赖这个接口；进程内实现之外还可以换成
/// 跨进程的实现而不动业务层。
pub trait ConnectionRegistry: Send + Sync {
    /// 注册用户连接，同一用户重复注册以新连接为准
    fn register(&self, user_id: i64, sender: mpsc::UnboundedSender<WsMessage>);
    /// 移除用户连接
    fn remove(&self, user_id: i64);
    /// 向指定用户投递消息，用户不在线或投递失败返回 false
    fn dispatch(&self, user_id: i64, message: WsMessage) -> bool;
    /// 检查用户是否在线
    fn is_online(&self, user_id: i64) -> bool;
    /// 获取在线用户数
    fn online_count(&self) -> usize;
}

/// 进程内连接注册表
pub struct InMemoryRegistry {
    /// 用户 ID -> 连接发送器
    connections: DashMap<i64, mpsc::UnboundedSender<WsMessage>>,
}

impl InMemoryRegistry {
    fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &CONNECTION_REGISTRY
    }
}

impl ConnectionRegistry for InMemoryRegistry {
    fn register(&self, user_id: i64, sender: mpsc::UnboundedSender<WsMessage>) {
        // 旧连接的发送器被覆盖后，旧会话的接收端会关闭并退出
        if self.connections.insert(user_id, sender).is_some() {
            debug!("Replaced existing WebSocket connection for user {}", user_id);
        }
    }

    fn remove(&self, user_id: i64) {
        self.connections.remove(&user_id);
    }

    fn dispatch(&self, user_id: i64, message: WsMessage) -> bool {
        // 先克隆发送器再发送，锁不跨越投递
        let sender = match self.connections.get(&user_id) {
            Some(entry) => entry.value().clone(),
            None => return false,
        };

        if sender.send(message).is_err() {
            // 接收端已关闭，清理失效连接
            self.connections.remove(&user_id);
            return false;
        }
        true
    }

    fn is_online(&self, user_id: i64) -> bool {
        self.connections.contains_key(&user_id)
    }

    fn online_count(&self) -> usize {
        self.connections.len()
    }
}

/// WebSocket 服务
pub struct WebSocketService;

impl WebSocketService {
    /// 处理 WebSocket 连接
    pub async fn handle_connection(
        user_id: i64,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        info!("WebSocket connected for user: {}", user_id);

        // 注册连接
        let (tx, mut rx) = mpsc::unbounded_channel();
        InMemoryRegistry::get().register(user_id, tx);

        // 发送连接成功消息
        let connected_msg = WsMessage::Connected { user_id };
        if let Ok(json) = serde_json::to_string(&connected_msg) {
            let _ = session.text(json).await;
        }

        // 心跳间隔
        let heartbeat_interval = std::time::Duration::from_secs(30);
        let mut heartbeat = tokio::time::interval(heartbeat_interval);

        loop {
            tokio::select! {
                // 处理来自客户端的消息
                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if let Ok(ws_msg) = serde_json::from_str::<WsMessage>(&text) {
                                match ws_msg {
                                    WsMessage::Ping => {
                                        let pong = serde_json::to_string(&WsMessage::Pong)
                                            .unwrap_or_else(|_| r#"{"type":"pong"}"#.to_string());
                                        if session.text(pong).await.is_err() {
                                            break;
                                        }
                                    }
                                    _ => {
                                        debug!("Received message from user {}: {:?}", user_id, ws_msg);
                                    }
                                }
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if session.pong(&data).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("WebSocket closed for user: {}", user_id);
                            break;
                        }
                        Some(Err(e)) => {
                            warn!("WebSocket error for user {}: {:?}", user_id, e);
                            break;
                        }
                        _ => {}
                    }
                }

                // 处理来自服务器的推送消息
                msg = rx.recv() => {
                    match msg {
                        Some(ws_msg) => {
                            if let Ok(json) = serde_json::to_string(&ws_msg)
                                && session.text(json).await.is_err() {
                                    break;
                                }
                        }
                        // 发送器被新连接覆盖或已移除
                        None => break,
                    }
                }

                // 心跳
                _ = heartbeat.tick() => {
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }

        // 清理连接
        InMemoryRegistry::get().remove(user_id);
        info!("WebSocket disconnected for user: {}", user_id);
    }
}

/// 辅助函数：向用户推送通知
pub fn push_notification_to_user(user_id: i64, notification: Notification) -> bool {
    let message = WsMessage::Notification {
        payload: NotificationPayload::from(notification),
    };
    InMemoryRegistry::get().dispatch(user_id, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> WsMessage {
        WsMessage::Notification {
            payload: NotificationPayload {
                id: 1,
                notification_type: "submission_approved".to_string(),
                title: "Approved".to_string(),
                message: "Your portfolio was approved".to_string(),
                announcement_id: None,
                created_at: chrono::Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn test_dispatch_to_registered_user() {
        let registry = InMemoryRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(7, tx);

        assert!(registry.is_online(7));
        assert!(registry.dispatch(7, sample_message()));
        assert!(matches!(
            rx.recv().await,
            Some(WsMessage::Notification { .. })
        ));
    }

    #[tokio::test]
    async fn test_dispatch_to_offline_user_is_noop() {
        let registry = InMemoryRegistry::new();
        assert!(!registry.dispatch(42, sample_message()));
        assert!(!registry.is_online(42));
    }

    #[tokio::test]
    async fn test_register_overwrites_previous_connection() {
        let registry = InMemoryRegistry::new();
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();

        registry.register(7, old_tx);
        registry.register(7, new_tx);
        assert_eq!(registry.online_count(), 1);

        assert!(registry.dispatch(7, sample_message()));
        // 消息到达新连接，旧连接的发送端已被丢弃
        assert!(new_rx.recv().await.is_some());
        assert!(old_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_removes_dead_connection() {
        let registry = InMemoryRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(7, tx);
        drop(rx);

        assert!(!registry.dispatch(7, sample_message()));
        assert!(!registry.is_online(7));
        assert_eq!(registry.online_count(), 0);
    }

    #[test]
    fn test_ws_message_wire_format() {
        let json = serde_json::to_string(&WsMessage::Ping).unwrap();
        assert_eq!(json, r#"{"type":"ping"}"#);

        let parsed: WsMessage = serde_json::from_str(r#"{"type":"pong"}"#).unwrap();
        assert!(matches!(parsed, WsMessage::Pong));
    }
}
