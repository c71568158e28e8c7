//! 页面模型
//!
//! 看板页面的内存表示：各区块内容与可见性、按钮状态、输入框、标签页和提示条。
//! 所有元素通过 [`ViewId`] 访问，在页面创建时一次性建立。

use std::fmt;

/// 页面元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    /// 股票走势标签页
    StockTrend,
    /// 行情面板
    StockInfo,
    /// 板块面板（首次渲染时创建）
    StockSectors,
    /// 走势图容器
    StockChartContainer,
    /// 场景搜索结果
    ScenarioResults,
    StockCodeInput,
    ScenarioInput,
    SearchStockBtn,
    SearchScenarioBtn,
}

impl ViewId {
    /// 页面中的元素 id
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::StockTrend => "stock-trend",
            ViewId::StockInfo => "stock-info",
            ViewId::StockSectors => "stock-sectors",
            ViewId::StockChartContainer => "stock-chart-container",
            ViewId::ScenarioResults => "scenario-results",
            ViewId::StockCodeInput => "stock-code-input",
            ViewId::ScenarioInput => "scenario-input",
            ViewId::SearchStockBtn => "search-stock-btn",
            ViewId::SearchScenarioBtn => "search-scenario-btn",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    StockTrend,
    ScenarioSearch,
}

impl TabId {
    pub const ALL: [TabId; 2] = [TabId::StockTrend, TabId::ScenarioSearch];

    pub fn as_str(&self) -> &'static str {
        match self {
            TabId::StockTrend => "stock-trend",
            TabId::ScenarioSearch => "scenario-search",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TabId::StockTrend => "股票走势",
            TabId::ScenarioSearch => "场景搜索",
        }
    }
}

/// 查询按钮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Loading,
}

/// 查询按钮
#[derive(Debug, Clone)]
pub struct Button {
    idle_label: String,
    busy_label: String,
    state: ActionState,
}

impl Button {
    pub fn new(idle_label: &str, busy_label: &str) -> Self {
        Self {
            idle_label: idle_label.to_string(),
            busy_label: busy_label.to_string(),
            state: ActionState::Idle,
        }
    }

    pub fn label(&self) -> &str {
        match self.state {
            ActionState::Idle => &self.idle_label,
            ActionState::Loading => &self.busy_label,
        }
    }

    pub fn disabled(&self) -> bool {
        self.state == ActionState::Loading
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn set_state(&mut self, state: ActionState) {
        self.state = state;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
}

/// 区块顶部的提示条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn to_html(&self) -> String {
        let (class, icon) = match self.kind {
            BannerKind::Error => ("error", "⚠️"),
            BannerKind::Warning => ("warning", "📅"),
        };
        format!(
            r#"<div class="{0}-message"><span class="{0}-icon">{1}</span><span class="{0}-text">{2}</span></div>"#,
            class,
            icon,
            super::format::escape_html(&self.message)
        )
    }
}

/// 页面区块
#[derive(Debug, Clone)]
pub struct Section {
    id: ViewId,
    class: &'static str,
    html: String,
    visible: bool,
    error: Option<Banner>,
    warning: Option<Banner>,
}

impl Section {
    fn new(id: ViewId, class: &'static str, visible: bool) -> Self {
        Self {
            id,
            class,
            html: String::new(),
            visible,
            error: None,
            warning: None,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn error(&self) -> Option<&Banner> {
        self.error.as_ref()
    }

    pub fn warning(&self) -> Option<&Banner> {
        self.warning.as_ref()
    }

    /// 替换区块内容，区块内原有的提示条一并清除
    pub fn set_content(&mut self, html: String) {
        self.html = html;
        self.error = None;
        self.warning = None;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// 插入错误提示，已有的错误提示先移除
    fn insert_error(&mut self, banner: Banner) {
        self.error = Some(banner);
    }

    /// 移除指定的错误提示，返回是否移除
    fn remove_error(&mut self, banner_id: u64) -> bool {
        match &self.error {
            Some(banner) if banner.id == banner_id => {
                self.error = None;
                true
            }
            _ => false,
        }
    }

    fn render(&self, children: &str) -> String {
        let style = if self.visible { "" } else { r#" style="display:none""# };
        let banners: String = [&self.error, &self.warning]
            .into_iter()
            .flatten()
            .map(Banner::to_html)
            .collect();
        format!(
            r#"<div id="{}" class="{}"{}>{}{}{}</div>"#,
            self.id, self.class, style, banners, self.html, children
        )
    }
}

/// 看板页面
#[derive(Debug, Clone)]
pub struct Page {
    active_tab: TabId,
    stock_trend: Section,
    stock_info: Section,
    stock_sectors: Option<Section>,
    stock_chart_container: Section,
    scenario_results: Section,
    stock_code_input: String,
    scenario_input: String,
    search_stock_btn: Button,
    search_scenario_btn: Button,
    next_banner_id: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            active_tab: TabId::StockTrend,
            stock_trend: Section::new(ViewId::StockTrend, "tab-content", true),
            stock_info: Section::new(ViewId::StockInfo, "stock-info", false),
            stock_sectors: None,
            stock_chart_container: Section::new(ViewId::StockChartContainer, "chart-container", false),
            scenario_results: Section::new(ViewId::ScenarioResults, "scenario-results", true),
            stock_code_input: String::new(),
            scenario_input: String::new(),
            search_stock_btn: Button::new("查询", "查询中..."),
            search_scenario_btn: Button::new("搜索", "搜索中..."),
            next_banner_id: 0,
        }
    }

    // ==================== 区块 ====================

    pub fn section(&self, id: ViewId) -> Option<&Section> {
        match id {
            ViewId::StockTrend => Some(&self.stock_trend),
            ViewId::StockInfo => Some(&self.stock_info),
            ViewId::StockSectors => self.stock_sectors.as_ref(),
            ViewId::StockChartContainer => Some(&self.stock_chart_container),
            ViewId::ScenarioResults => Some(&self.scenario_results),
            _ => None,
        }
    }

    pub fn section_mut(&mut self, id: ViewId) -> Option<&mut Section> {
        match id {
            ViewId::StockTrend => Some(&mut self.stock_trend),
            ViewId::StockInfo => Some(&mut self.stock_info),
            ViewId::StockSectors => self.stock_sectors.as_mut(),
            ViewId::StockChartContainer => Some(&mut self.stock_chart_container),
            ViewId::ScenarioResults => Some(&mut self.scenario_results),
            _ => None,
        }
    }

    /// 创建或更新板块面板
    pub fn upsert_sectors(&mut self, html: String) {
        let section = self
            .stock_sectors
            .get_or_insert_with(|| Section::new(ViewId::StockSectors, "stock-sectors", false));
        section.set_content(html);
        section.show();
    }

    // ==================== 输入框与按钮 ====================

    pub fn input(&self, id: ViewId) -> Option<&str> {
        match id {
            ViewId::StockCodeInput => Some(&self.stock_code_input),
            ViewId::ScenarioInput => Some(&self.scenario_input),
            _ => None,
        }
    }

    pub fn set_input(&mut self, id: ViewId, value: &str) -> bool {
        match id {
            ViewId::StockCodeInput => self.stock_code_input = value.to_string(),
            ViewId::ScenarioInput => self.scenario_input = value.to_string(),
            _ => return false,
        }
        true
    }

    pub fn button(&self, id: ViewId) -> Option<&Button> {
        match id {
            ViewId::SearchStockBtn => Some(&self.search_stock_btn),
            ViewId::SearchScenarioBtn => Some(&self.search_scenario_btn),
            _ => None,
        }
    }

    pub fn button_mut(&mut self, id: ViewId) -> Option<&mut Button> {
        match id {
            ViewId::SearchStockBtn => Some(&mut self.search_stock_btn),
            ViewId::SearchScenarioBtn => Some(&mut self.search_scenario_btn),
            _ => None,
        }
    }

    // ==================== 标签页 ====================

    pub fn active_tab(&self) -> TabId {
        self.active_tab
    }

    /// 取消所有标签的激活状态，再激活目标标签
    pub fn activate_tab(&mut self, tab: TabId) {
        self.active_tab = tab;
    }

    // ==================== 提示条 ====================

    /// 在区块顶部插入错误提示，同一区块只保留一条，返回提示编号
    pub fn insert_error(&mut self, target: ViewId, message: &str) -> Option<u64> {
        self.next_banner_id += 1;
        let banner = Banner {
            id: self.next_banner_id,
            kind: BannerKind::Error,
            message: message.to_string(),
        };
        let section = self.section_mut(target)?;
        section.insert_error(banner.clone());
        Some(banner.id)
    }

    /// 移除指定编号的错误提示；已被替换或清除时不做处理
    pub fn remove_error(&mut self, target: ViewId, banner_id: u64) -> bool {
        self.section_mut(target)
            .map(|section| section.remove_error(banner_id))
            .unwrap_or(false)
    }

    /// 插入警告提示，已有警告时不重复插入
    pub fn insert_warning_once(&mut self, target: ViewId, message: &str) -> bool {
        self.next_banner_id += 1;
        let id = self.next_banner_id;
        match self.section_mut(target) {
            Some(section) if section.warning.is_none() => {
                section.warning = Some(Banner {
                    id,
                    kind: BannerKind::Warning,
                    message: message.to_string(),
                });
                true
            }
            _ => false,
        }
    }

    // ==================== 输出 ====================

    fn render_button(&self, id: ViewId) -> String {
        let button = match self.button(id) {
            Some(button) => button,
            None => return String::new(),
        };
        let disabled = if button.disabled() { " disabled" } else { "" };
        format!(
            r#"<button id="{}" class="search-btn"{}>{}</button>"#,
            id,
            disabled,
            button.label()
        )
    }

    fn render_input(&self, id: ViewId) -> String {
        format!(
            r#"<input id="{}" type="text" value="{}">"#,
            id,
            super::format::escape_html(self.input(id).unwrap_or_default())
        )
    }

    /// 渲染整个页面主体
    pub fn to_html(&self) -> String {
        let tabs: String = TabId::ALL
            .iter()
            .map(|tab| {
                let active = if *tab == self.active_tab { " active" } else { "" };
                format!(
                    r#"<button class="tab-btn{}" data-tab="{}">{}</button>"#,
                    active,
                    tab.as_str(),
                    tab.title()
                )
            })
            .collect();

        let chart = self
            .stock_chart_container
            .render(&format!(r#"<canvas id="{}"></canvas>"#, super::chart::CANVAS_ID));
        let sectors = self
            .stock_sectors
            .as_ref()
            .map(|s| s.render(""))
            .unwrap_or_default();
        let trend_children = format!(
            r#"<div class="search-box">{}{}</div>{}{}{}"#,
            self.render_input(ViewId::StockCodeInput),
            self.render_button(ViewId::SearchStockBtn),
            self.stock_info.render(""),
            sectors,
            chart
        );

        let mut trend = self.stock_trend.clone();
        trend.class = tab_content_class(self.active_tab == TabId::StockTrend);
        let scenario_active = self.active_tab == TabId::ScenarioSearch;

        format!(
            concat!(
                r#"<div class="tabs">{}</div>"#,
                "\n{}\n",
                r#"<div id="{}" class="{}"><div class="search-box">{}{}</div>{}</div>"#
            ),
            tabs,
            trend.render(&trend_children),
            TabId::ScenarioSearch.as_str(),
            tab_content_class(scenario_active),
            self.render_input(ViewId::ScenarioInput),
            self.render_button(ViewId::SearchScenarioBtn),
            self.scenario_results.render("")
        )
    }
}

fn tab_content_class(active: bool) -> &'static str {
    if active {
        "tab-content active"
    } else {
        "tab-content"
    }
}
