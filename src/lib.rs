//! 股票看板客户端
//!
//! 调用 stockshark 后端的只读接口，把行情、走势、板块和场景搜索结果
//! 渲染到看板页面模型中

pub mod config;    // 配置
pub mod dashboard; // 看板控制器
pub mod handlers;  // 页面事件处理
pub mod models;    // 数据模型定义
pub mod services;  // 后端接口与交易日
pub mod view;      // 页面模型与渲染

pub use dashboard::Dashboard;
pub use handlers::UiEvent;
