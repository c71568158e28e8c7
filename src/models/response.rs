//! 通用 API 响应模型
//!
//! 后端所有接口返回统一格式 `{ success, data?, error? }`

use serde::Deserialize;

/// 统一 API 响应结构
///
/// - success: 请求是否成功
/// - data: 响应数据（成功时有值）
/// - error: 失败原因（失败时有值）
/// - message: 附加消息（健康检查等接口使用）
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    #[serde(default)]
    pub success: bool,
    /// 响应数据，缺省时为 None
    pub data: Option<T>,
    /// 错误信息
    #[serde(default)]
    pub error: Option<String>,
    /// 响应消息
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 后端提供的错误信息，为空时使用默认文案
    pub fn error_or(&self, default: &str) -> String {
        match self.error.as_deref() {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => default.to_string(),
        }
    }

    /// 仅在 success 为真且带有数据时返回数据
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
