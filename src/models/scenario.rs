//! 场景搜索数据模型
//!
//! 按关键字查找相关企业的结果

use serde::{Deserialize, Serialize};

/// 单个企业搜索结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// 公司名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// 公司名称（搜索接口的旧字段名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 公司描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 主营业务，描述缺失时使用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    /// 股票代码（未上市公司为空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// 是否已上市
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_listed: Option<bool>,
    /// 是否有上市公司持股
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_holding: Option<bool>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ScenarioResult {
    pub fn company_name(&self) -> Option<&str> {
        non_empty(&self.company_name).or_else(|| non_empty(&self.name))
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description).or_else(|| non_empty(&self.business))
    }

    pub fn stock_code(&self) -> Option<&str> {
        non_empty(&self.stock_code).or_else(|| non_empty(&self.code))
    }

    pub fn is_listed(&self) -> bool {
        self.is_listed.unwrap_or(false)
    }

    pub fn has_holding(&self) -> bool {
        self.has_holding.unwrap_or(false)
    }
}

/// 关键字搜索的 data 字段
///
/// 可能是结果数组，也可能是 `{keyword, results, total}` 对象
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioPayload {
    List(Vec<ScenarioResult>),
    Wrapped {
        #[serde(default)]
        keyword: Option<String>,
        #[serde(default)]
        results: Vec<ScenarioResult>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl ScenarioPayload {
    pub fn into_results(self) -> Vec<ScenarioResult> {
        match self {
            ScenarioPayload::List(items) => items,
            ScenarioPayload::Wrapped { results, .. } => results,
        }
    }
}
