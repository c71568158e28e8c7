//! 视图模块
//!
//! 页面模型、HTML 片段、走势图和数值格式化

pub mod chart;
pub mod format;
pub mod page;
pub mod render;

pub use chart::{ChartRenderer, LineChartConfig, MemoryCanvas, StockChart};
pub use page::{ActionState, Page, TabId, ViewId};
