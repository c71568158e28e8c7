//! 数据服务模块
//!
//! 后端接口访问和交易日计算

pub mod api_client;       // 后端 REST 客户端
pub mod trading_calendar; // 交易日判断

pub use api_client::ApiClient;
