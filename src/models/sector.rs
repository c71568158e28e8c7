//! 板块数据模型
//!
//! 股票所属的行业和概念

use serde::{Deserialize, Serialize};

/// 行业信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Industry {
    /// 行业名称
    #[serde(default)]
    pub name: Option<String>,
    /// 行业内股票数量
    #[serde(default)]
    pub stock_count: Option<u64>,
}

/// 概念标签
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Concept {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stock_count: Option<u64>,
}

/// 股票所属板块
///
/// 对应 `/analysis/stock/sectors` 的 data 字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub concepts: Vec<Concept>,
}
