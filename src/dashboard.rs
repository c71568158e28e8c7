//! 看板控制器
//!
//! 持有后端客户端、页面模型和走势图实例，负责渲染和提示条。
//! 各查询流程见 [`crate::handlers`]。
//!
//! `Dashboard` 可克隆，克隆体共享同一页面。同时发起的两次查询不会互相取消，
//! 最后返回的响应决定最终显示内容。

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use crate::config::AppConfig;
use crate::handlers::Bindings;
use crate::models::{HistoryPoint, Quote, ScenarioResult, SectorInfo};
use crate::services::{trading_calendar, ApiClient};
use crate::view::page::{ActionState, Page, ViewId};
use crate::view::render;
use crate::view::{ChartRenderer, LineChartConfig, StockChart};

/// 非交易日提示文案
pub const NON_TRADING_DAY_WARNING: &str = "今天是非交易日，数据可能不是最新的";

/// 股票看板
#[derive(Clone)]
pub struct Dashboard {
    api: ApiClient,
    page: Arc<Mutex<Page>>,
    chart: Arc<Mutex<StockChart>>,
    bindings: Arc<RwLock<Bindings>>,
    /// 错误提示保留时长
    banner_ttl: Duration,
    /// 走势图回看天数
    history_days: i64,
    /// 交易日判断所用时区
    tz: Tz,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Dashboard {
    /// 按配置创建看板，图表绘制交给 `renderer`
    pub fn new(config: &AppConfig, renderer: Box<dyn ChartRenderer>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(&config.api)?,
            page: Arc::new(Mutex::new(Page::new())),
            chart: Arc::new(Mutex::new(StockChart::new(renderer))),
            bindings: Arc::new(RwLock::new(Bindings::default())),
            banner_ttl: config.dashboard.banner_ttl(),
            history_days: config.dashboard.history_days,
            tz: config.dashboard.tz()?,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn page(&self) -> MutexGuard<'_, Page> {
        lock(&self.page)
    }

    pub(crate) fn bindings(&self) -> Bindings {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn history_days(&self) -> i64 {
        self.history_days
    }

    /// 页面当前状态的副本
    pub fn snapshot(&self) -> Page {
        self.page().clone()
    }

    pub fn page_html(&self) -> String {
        self.page().to_html()
    }

    /// 当前走势图配置
    pub fn chart_config(&self) -> Option<LineChartConfig> {
        lock(&self.chart).config().cloned()
    }

    /// 本地当前日期
    pub fn today(&self) -> NaiveDate {
        trading_calendar::today_in(self.tz)
    }

    // ==================== 初始化 ====================

    /// 绑定页面事件，并检查今天是否为交易日
    pub fn initialize(&self) {
        self.initialize_on(self.today());
    }

    /// 以指定日期初始化
    pub fn initialize_on(&self, today: NaiveDate) {
        *self.bindings.write().unwrap_or_else(PoisonError::into_inner) = Bindings::standard();
        self.show_non_trading_day_warning(today);
        log::info!("看板初始化完成，当前日期 {}", trading_calendar::iso_date(today));
    }

    /// 非交易日时在股票走势区块顶部显示提示，返回是否新插入
    pub fn show_non_trading_day_warning(&self, today: NaiveDate) -> bool {
        if trading_calendar::is_trading_day(today) {
            return false;
        }
        self.page()
            .insert_warning_once(ViewId::StockTrend, NON_TRADING_DAY_WARNING)
    }

    // ==================== 提示条 ====================

    /// 在目标区块顶部显示错误提示，到期后自动移除
    ///
    /// 同一区块只保留一条；新提示替换旧提示后，旧提示的定时器不再生效
    pub fn show_error(&self, target: ViewId, message: &str) {
        let banner_id = match self.page().insert_error(target, message) {
            Some(id) => id,
            None => {
                log::warn!("区块 {} 不存在，无法显示错误提示: {}", target, message);
                return;
            }
        };

        let page = Arc::clone(&self.page);
        let ttl = self.banner_ttl;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(ttl).await;
                    lock(&page).remove_error(target, banner_id);
                });
            }
            Err(_) => log::warn!("当前不在异步运行时中，错误提示不会自动移除"),
        }
    }

    /// 将按钮置为查询中，返回的守卫在释放时恢复按钮
    pub(crate) fn busy(&self, button: ViewId) -> BusyGuard {
        if let Some(b) = self.page().button_mut(button) {
            b.set_state(ActionState::Loading);
        }
        BusyGuard {
            page: Arc::clone(&self.page),
            button,
        }
    }

    pub(crate) fn hide(&self, target: ViewId) {
        if let Some(section) = self.page().section_mut(target) {
            section.hide();
        }
    }

    // ==================== 渲染 ====================

    /// 渲染行情面板
    pub fn render_quote(&self, quote: &Quote) {
        let html = render::quote_html(quote);
        let mut page = self.page();
        if let Some(section) = page.section_mut(ViewId::StockInfo) {
            section.set_content(html);
            section.show();
        }
    }

    /// 渲染板块面板，首次调用时创建
    pub fn render_sectors(&self, info: &SectorInfo) {
        self.page().upsert_sectors(render::sectors_html(info));
    }

    /// 重绘走势图：先销毁旧实例，再创建新实例
    pub fn render_chart(&self, points: &[HistoryPoint]) -> Result<()> {
        if let Some(section) = self.page().section_mut(ViewId::StockChartContainer) {
            section.show();
        }
        lock(&self.chart).replace(LineChartConfig::closing_prices(points))?;
        Ok(())
    }

    /// 渲染场景搜索结果
    pub fn render_scenario_results(&self, items: &[ScenarioResult]) {
        let html = render::scenario_results_html(items);
        let mut page = self.page();
        if let Some(section) = page.section_mut(ViewId::ScenarioResults) {
            section.set_content(html);
            section.show();
        }
    }
}

/// 查询期间的按钮守卫，无论流程如何结束都会恢复按钮
pub(crate) struct BusyGuard {
    page: Arc<Mutex<Page>>,
    button: ViewId,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(button) = lock(&self.page).button_mut(self.button) {
            button.set_state(ActionState::Idle);
        }
    }
}
