//! 后端 REST 接口客户端
//!
//! 封装看板用到的只读接口，全部为 GET 请求：
//! - `/analysis/stock/quote`：实时行情
//! - `/analysis/stock/history`：历史走势
//! - `/analysis/stock/sectors`：所属板块
//! - `/search/stock/by-keyword`：关键字搜索企业
//! - `/analysis/health`：健康检查

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::models::{ApiResponse, HistoryPoint, Quote, ScenarioPayload, SectorInfo};

use super::trading_calendar::iso_date;

/// 行情接口
pub const QUOTE_PATH: &str = "analysis/stock/quote";
/// 历史走势接口
pub const HISTORY_PATH: &str = "analysis/stock/history";
/// 所属板块接口
pub const SECTORS_PATH: &str = "analysis/stock/sectors";
/// 关键字搜索接口
pub const KEYWORD_SEARCH_PATH: &str = "search/stock/by-keyword";
/// 健康检查接口
pub const HEALTH_PATH: &str = "analysis/health";

/// 看板后端客户端
///
/// 内部的 reqwest 客户端可廉价克隆
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP 客户端
    client: Client,
    /// API 根地址，不带末尾斜杠
    base_url: String,
}

impl ApiClient {
    /// 按配置创建客户端
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("无效的后端地址: {}", config.base_url))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("创建 HTTP 客户端失败")?;

        Ok(Self { client, base_url })
    }

    /// 拼接接口地址，查询参数按 URL 编码
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&raw).with_context(|| format!("无效的接口地址: {}", raw))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// 发起 GET 请求并解析统一响应
    ///
    /// 后端出错时同样返回 JSON 响应体（HTTP 400/500），因此不按状态码判断
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<ApiResponse<T>> {
        log::debug!("📡 请求 URL: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("请求 {} 失败", url.path()))?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            log::warn!("接口 {} 返回 HTTP {}", url.path(), status);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("解析 {} 的响应失败 (HTTP {})", url.path(), status))
    }

    /// 获取股票实时行情
    pub async fn quote(&self, symbol: &str) -> Result<ApiResponse<Quote>> {
        let url = self.endpoint(QUOTE_PATH, &[("symbol", symbol)])?;
        self.get_json(url).await
    }

    /// 获取股票历史走势
    pub async fn history(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ApiResponse<Vec<HistoryPoint>>> {
        let start = iso_date(start_date);
        let end = iso_date(end_date);
        let url = self.endpoint(
            HISTORY_PATH,
            &[("symbol", symbol), ("start_date", &start), ("end_date", &end)],
        )?;
        self.get_json(url).await
    }

    /// 获取股票所属行业和概念
    pub async fn sectors(&self, symbol: &str) -> Result<ApiResponse<SectorInfo>> {
        let url = self.endpoint(SECTORS_PATH, &[("symbol", symbol)])?;
        self.get_json(url).await
    }

    /// 按关键字搜索相关企业
    pub async fn search_by_keyword(&self, keyword: &str) -> Result<ApiResponse<ScenarioPayload>> {
        let url = self.endpoint(KEYWORD_SEARCH_PATH, &[("keyword", keyword)])?;
        self.get_json(url).await
    }

    /// 后端健康检查
    pub async fn health(&self) -> Result<ApiResponse<serde_json::Value>> {
        let url = self.endpoint(HEALTH_PATH, &[])?;
        self.get_json(url).await
    }
}
