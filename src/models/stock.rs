//! 股票数据模型
//!
//! 定义行情快照和历史走势的数据结构。后端不同版本字段命名不一致，
//! 这里保留原始字段，由访问方法统一取值。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::view::format::js_number;

/// 展示用的标量字段
///
/// 后端可能返回数字，也可能返回数字字符串，显示时保持原样
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// 按 JavaScript 真值规则判断：0、NaN、空串视为假
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// 转为数值，空白字符串视为 0，无法解析时返回 None
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) if s.trim().is_empty() => Some(0.0),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => f.write_str(&js_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// 取第一个真值字段
fn first_truthy<'a>(candidates: &[&'a Option<FieldValue>]) -> Option<&'a FieldValue> {
    candidates
        .iter()
        .copied()
        .filter_map(Option::as_ref)
        .find(|v| v.is_truthy())
}

/// 股票实时行情
///
/// 对应 `/analysis/stock/quote` 的 data 字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    /// 股票代码
    #[serde(default)]
    pub symbol: Option<FieldValue>,
    /// 股票代码（行情接口的旧字段名）
    #[serde(default)]
    pub code: Option<FieldValue>,
    /// 股票名称
    #[serde(default)]
    pub name: Option<FieldValue>,
    /// 收盘价
    #[serde(default)]
    pub close: Option<FieldValue>,
    /// 最新价
    #[serde(default)]
    pub price: Option<FieldValue>,
    /// 开盘价
    #[serde(default)]
    pub open: Option<FieldValue>,
    /// 最高价
    #[serde(default)]
    pub high: Option<FieldValue>,
    /// 最低价
    #[serde(default)]
    pub low: Option<FieldValue>,
    /// 昨收
    #[serde(default)]
    pub pre_close: Option<FieldValue>,
    /// 昨收（行情接口的旧字段名）
    #[serde(default)]
    pub previous_close: Option<FieldValue>,
    /// 涨跌幅（百分比）
    #[serde(default)]
    pub change_pct: Option<FieldValue>,
    /// 成交量
    #[serde(default)]
    pub volume: Option<FieldValue>,
    /// 成交额
    #[serde(default)]
    pub amount: Option<FieldValue>,
}

impl Quote {
    pub fn symbol(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.symbol, &self.code])
    }

    /// 名称缺失时退回代码
    pub fn display_name(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.name]).or_else(|| self.symbol())
    }

    /// 最新价，优先 close，其次 price
    pub fn last_price(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.close, &self.price])
    }

    pub fn open(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.open])
    }

    pub fn high(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.high])
    }

    pub fn low(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.low])
    }

    pub fn pre_close(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.pre_close, &self.previous_close])
    }

    /// 涨跌幅，缺失或为 null 时按 0 处理
    pub fn change_pct(&self) -> FieldValue {
        self.change_pct.clone().unwrap_or(FieldValue::Number(0.0))
    }

    /// 涨跌幅是否非负（0 视为上涨）
    pub fn is_rising(&self) -> bool {
        self.change_pct()
            .as_f64()
            .map(|pct| pct >= 0.0)
            .unwrap_or(false)
    }

    pub fn volume(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.volume])
    }

    pub fn amount(&self) -> Option<&FieldValue> {
        first_truthy(&[&self.amount])
    }
}

/// 股票历史走势中的一个交易日
///
/// 同时兼容英文字段和数据库导出的中文字段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(rename = "日期", default, skip_serializing_if = "Option::is_none")]
    pub date_cn: Option<String>,
    #[serde(rename = "收盘", default, skip_serializing_if = "Option::is_none")]
    pub close_cn: Option<f64>,
    #[serde(rename = "成交量", default, skip_serializing_if = "Option::is_none")]
    pub volume_cn: Option<f64>,
}

impl HistoryPoint {
    pub fn new(date: &str, close: f64, volume: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            close: Some(close),
            volume: Some(volume),
            ..Self::default()
        }
    }

    /// 日期标签
    pub fn date(&self) -> String {
        self.date
            .clone()
            .or_else(|| self.date_cn.clone())
            .unwrap_or_default()
    }

    /// 收盘价
    pub fn close(&self) -> Option<f64> {
        self.close.or(self.close_cn)
    }

    /// 成交量
    pub fn volume(&self) -> Option<f64> {
        self.volume.or(self.volume_cn)
    }
}
