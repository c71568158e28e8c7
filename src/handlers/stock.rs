//! 股票查询流程
//!
//! 行情 → 历史走势 → 所属板块，依次请求。走势和板块失败只影响各自区块。

use crate::dashboard::Dashboard;
use crate::services::trading_calendar;
use crate::view::page::ViewId;

const EMPTY_CODE: &str = "请输入股票代码";
const QUOTE_FAILED: &str = "获取股票信息失败";
pub(crate) const NETWORK_FAILED: &str = "网络请求失败，请稍后重试";

impl Dashboard {
    /// 查询股票：先取行情，成功后再加载走势图和板块
    pub async fn search_stock(&self, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            self.show_error(ViewId::StockTrend, EMPTY_CODE);
            return;
        }

        let _busy = self.busy(ViewId::SearchStockBtn);
        log::info!("查询股票 {}", code);

        match self.api().quote(code).await {
            Ok(response) => {
                let message = response.error_or(QUOTE_FAILED);
                match response.into_data() {
                    Some(quote) => {
                        self.render_quote(&quote);
                        self.load_stock_history(code).await;
                        self.load_stock_sectors(code).await;
                    }
                    None => self.show_error(ViewId::StockTrend, &message),
                }
            }
            Err(e) => {
                self.show_error(ViewId::StockTrend, NETWORK_FAILED);
                log::error!("获取股票数据失败: {:#}", e);
            }
        }
    }

    /// 加载走势图，无数据或失败时隐藏图表区
    async fn load_stock_history(&self, code: &str) {
        let (start, end) = trading_calendar::history_window(self.today(), self.history_days());

        let points = match self.api().history(code, start, end).await {
            Ok(response) => response.into_data().filter(|points| !points.is_empty()),
            Err(e) => {
                log::error!("获取股票历史数据失败: {:#}", e);
                None
            }
        };

        match points {
            Some(points) => {
                if let Err(e) = self.render_chart(&points) {
                    log::error!("绘制走势图失败: {:#}", e);
                    self.hide(ViewId::StockChartContainer);
                }
            }
            None => self.hide(ViewId::StockChartContainer),
        }
    }

    /// 加载所属板块，失败时保持原样
    async fn load_stock_sectors(&self, code: &str) {
        match self.api().sectors(code).await {
            Ok(response) => {
                if let Some(info) = response.into_data() {
                    self.render_sectors(&info);
                }
            }
            Err(e) => log::error!("获取股票板块信息失败: {:#}", e),
        }
    }
}
