//! HTML 片段渲染
//!
//! 把接口返回的视图模型拼装为页面片段，样式类名与看板前端样式表一致

use crate::models::{FieldValue, Quote, ScenarioResult, SectorInfo};

use super::format::{escape_html, format_amount, format_volume};

const PRICE_PLACEHOLDER: &str = "0.00";

fn field_text(value: Option<&FieldValue>, fallback: &str) -> String {
    escape_html(&value.map(FieldValue::to_string).unwrap_or_else(|| fallback.to_string()))
}

/// 成交量/成交额的缩写文本
///
/// 数值型按万/亿缩写，无法解析的文本原样显示
fn magnitude_text(value: Option<&FieldValue>, format: fn(f64) -> String) -> String {
    match value {
        None => "0".to_string(),
        Some(v) => match v.as_f64() {
            Some(n) if n >= 10_000.0 => format(n),
            _ => escape_html(&v.to_string()),
        },
    }
}

/// 涨跌标识：样式类名和箭头
pub fn change_indicator(quote: &Quote) -> (&'static str, &'static str) {
    if quote.is_rising() {
        ("positive", "↑")
    } else {
        ("negative", "↓")
    }
}

fn detail_item(label: &str, value: &str, class: Option<&str>) -> String {
    let class = match class {
        Some(extra) => format!("value {}", extra),
        None => "value".to_string(),
    };
    format!(
        r#"<div class="detail-item"><span class="label">{}</span><span class="{}">{}</span></div>"#,
        label, class, value
    )
}

/// 行情面板
pub fn quote_html(quote: &Quote) -> String {
    let name = field_text(quote.display_name(), "未知");
    let symbol = field_text(quote.symbol(), "N/A");
    let (change_class, change_icon) = change_indicator(quote);
    let change = format!("{} {}%", change_icon, escape_html(&quote.change_pct().to_string()));

    let details = [
        detail_item("最新价", &field_text(quote.last_price(), PRICE_PLACEHOLDER), None),
        detail_item("涨跌幅", &change, Some(change_class)),
        detail_item("成交量", &magnitude_text(quote.volume(), format_volume), None),
        detail_item("成交额", &magnitude_text(quote.amount(), format_amount), None),
        detail_item("开盘价", &field_text(quote.open(), PRICE_PLACEHOLDER), None),
        detail_item("最高价", &field_text(quote.high(), PRICE_PLACEHOLDER), None),
        detail_item("最低价", &field_text(quote.low(), PRICE_PLACEHOLDER), None),
        detail_item("昨收", &field_text(quote.pre_close(), PRICE_PLACEHOLDER), None),
    ];

    format!(
        concat!(
            r#"<div class="stock-header"><h2>{}</h2><span class="stock-code">{}</span></div>"#,
            "\n",
            r#"<div class="stock-details">{}</div>"#
        ),
        name,
        symbol,
        details.join("")
    )
}

/// 板块面板内容
pub fn sectors_html(info: &SectorInfo) -> String {
    let industry_name = info
        .industry
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("未知");
    let industry_count = info.industry.stock_count.unwrap_or(0);

    let concepts = if info.concepts.is_empty() {
        r#"<div class="no-concepts">暂无概念信息</div>"#.to_string()
    } else {
        info.concepts
            .iter()
            .map(|concept| {
                format!(
                    r#"<div class="concept-item"><span class="concept-name">{}</span><span class="concept-count">{}只</span></div>"#,
                    escape_html(concept.name.as_deref().unwrap_or_default()),
                    concept.stock_count.unwrap_or(0)
                )
            })
            .collect::<String>()
    };

    format!(
        concat!(
            "<h3>所属板块</h3>\n",
            r#"<div class="sectors-content">"#,
            r#"<div class="sector-section"><h4>行业</h4><div class="sector-item">"#,
            r#"<span class="sector-name">{}</span><span class="sector-count">{}只股票</span>"#,
            "</div></div>",
            r#"<div class="sector-section"><h4>概念</h4><div class="concepts-list">{}</div></div>"#,
            "</div>"
        ),
        escape_html(industry_name),
        industry_count,
        concepts
    )
}

/// 场景搜索加载中
pub fn loading_html() -> String {
    r#"<div class="loading"><div class="spinner"></div><p>正在搜索相关企业...</p></div>"#.to_string()
}

fn scenario_card(item: &ScenarioResult) -> String {
    let company_name = escape_html(item.company_name().unwrap_or("未知公司"));
    let description = escape_html(item.description().unwrap_or("暂无描述"));

    let listed_status = if item.is_listed() {
        r#"<span class="badge listed">已上市</span>"#
    } else {
        r#"<span class="badge unlisted">未上市</span>"#
    };

    let stock_info = item
        .stock_code()
        .map(|code| format!(r#"<div class="stock-info">股票代码: {}</div>"#, escape_html(code)))
        .unwrap_or_default();

    let holding_info = if item.has_holding() {
        r#"<div class="holding-info">有上市公司持股</div>"#
    } else {
        ""
    };

    format!(
        concat!(
            r#"<div class="result-card">"#,
            r#"<div class="result-header"><h3>{}</h3>{}</div>"#,
            r#"<div class="result-body"><div class="result-description">{}</div>{}{}</div>"#,
            "</div>"
        ),
        company_name, listed_status, description, stock_info, holding_info
    )
}

/// 场景搜索结果列表
pub fn scenario_results_html(items: &[ScenarioResult]) -> String {
    if items.is_empty() {
        return r#"<p class="no-results">未找到相关企业信息</p>"#.to_string();
    }

    let cards: String = items.iter().map(scenario_card).collect();
    format!(r#"<div class="results-list">{}</div>"#, cards)
}
