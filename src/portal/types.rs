use crate::portal::error::{PortalError, PortalResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

/// 可能携带错误描述的 body 字段
const MESSAGE_FIELDS: [&str; 4] = ["message", "error", "detail", "status"];

/// 只关心提示消息的通用响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// 从 body 中取出第一个字符串类型的提示字段
pub fn extract_message(body: &Value) -> Option<String> {
    MESSAGE_FIELDS
        .iter()
        .filter(|field| **field != "status")
        .find_map(|field| body.get(*field).and_then(Value::as_str))
        .map(str::to_string)
}

/// body 中任一提示字段包含 "401"（或数值状态为 401）即视为会话失效
pub fn mentions_unauthorized(body: &Value) -> bool {
    MESSAGE_FIELDS.iter().any(|field| match body.get(*field) {
        Some(Value::String(s)) => s.contains("401"),
        Some(Value::Number(n)) => n.as_u64() == Some(401),
        _ => false,
    })
}

/// 通用 HTTP 响应处理：区分 401、其他失败和成功，成功时反序列化为 `T`
pub async fn handle_http_response<T: DeserializeOwned>(
    response: reqwest::Response,
    operation_name: &str,
) -> PortalResult<T> {
    let status = response.status();

    // body 只能读取一次
    let body_bytes = response.bytes().await?;
    let body_str = String::from_utf8_lossy(&body_bytes);
    debug!("[HTTP] {}响应 Body: {}", operation_name, body_str);

    // 空 body 按空对象处理
    let body: Option<Value> = if body_str.trim().is_empty() {
        Some(Value::Object(Default::default()))
    } else {
        serde_json::from_slice(&body_bytes).ok()
    };
    let message = body.as_ref().and_then(extract_message);

    if status == StatusCode::UNAUTHORIZED || body.as_ref().is_some_and(mentions_unauthorized) {
        warn!(
            "[HTTP] {}会话被拒绝，HTTP状态: {}, 响应: {}",
            operation_name, status, body_str
        );
        return Err(PortalError::Unauthorized(message));
    }

    if !status.is_success() {
        error!(
            "[HTTP] {}请求失败，HTTP状态: {}, 响应: {}",
            operation_name, status, body_str
        );
        return Err(PortalError::Server {
            status: status.as_u16(),
            message,
        });
    }
    debug!("[HTTP] {}请求成功，HTTP状态: {}", operation_name, status);

    let body = body.ok_or_else(|| {
        error!("[HTTP] {}响应不是合法 JSON: {}", operation_name, body_str);
        PortalError::Decode(format!("{}响应不是合法 JSON", operation_name))
    })?;

    serde_json::from_value(body).map_err(|e| {
        error!(
            "[HTTP] {}反序列化失败: {:?}\n原始响应: {}",
            operation_name, e, body_str
        );
        PortalError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_401_in_message_fields() {
        assert!(mentions_unauthorized(&json!({"message": "Error 401: token expired"})));
        assert!(mentions_unauthorized(&json!({"error": "401"})));
        assert!(mentions_unauthorized(&json!({"status": 401})));
        assert!(!mentions_unauthorized(&json!({"message": "ok", "page": "chat_page"})));
        // 只检查提示字段
        assert!(!mentions_unauthorized(&json!({"token": "a401b"})));
    }

    #[test]
    fn extract_message_skips_status() {
        assert_eq!(
            extract_message(&json!({"status": "fail", "error": "bad email"})).as_deref(),
            Some("bad email")
        );
        assert_eq!(extract_message(&json!({"status": "fail"})), None);
    }
}
