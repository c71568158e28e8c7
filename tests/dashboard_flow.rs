//! 看板完整流程测试
//!
//! 用 actix-web 在随机端口启动模拟后端，记录每次请求，验证看板的请求顺序和页面结果

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use chrono::NaiveDate;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use stockshark_dashboard::config::AppConfig;
use stockshark_dashboard::view::{ActionState, MemoryCanvas, ViewId};
use stockshark_dashboard::{Dashboard, UiEvent};

/// 模拟后端的响应脚本
#[derive(Clone)]
struct Script {
    responses: HashMap<&'static str, (u16, String)>,
}

impl Script {
    fn new() -> Self {
        let mut responses = HashMap::new();
        responses.insert(
            "quote",
            (
                200,
                json!({
                    "success": true,
                    "data": {
                        "code": "600000",
                        "name": "浦发银行",
                        "price": 10.35,
                        "change_pct": -1.5,
                        "volume": 45678900,
                        "amount": 472345678.9,
                        "open": 10.5,
                        "high": 10.56,
                        "low": 10.3,
                        "previous_close": 10.51
                    }
                })
                .to_string(),
            ),
        );
        responses.insert(
            "history",
            (
                200,
                json!({
                    "success": true,
                    "data": [
                        {"date": "2024-01-02", "close": 10.2, "volume": 1200000},
                        {"date": "2024-01-03", "close": 10.4, "volume": 980000},
                        {"日期": "2024-01-04", "收盘": 10.1, "成交量": 1500000}
                    ]
                })
                .to_string(),
            ),
        );
        responses.insert(
            "sectors",
            (
                200,
                json!({
                    "success": true,
                    "data": {
                        "symbol": "600000",
                        "name": "浦发银行",
                        "industry": {"name": "银行", "stock_count": 42},
                        "concepts": [{"name": "上证50", "stock_count": 50}]
                    }
                })
                .to_string(),
            ),
        );
        responses.insert(
            "search",
            (
                200,
                json!({
                    "success": true,
                    "data": [
                        {
                            "company_name": "宁德时代",
                            "description": "动力电池系统提供商",
                            "stock_code": "300750",
                            "is_listed": true,
                            "has_holding": false
                        },
                        {
                            "company_name": "某固态电池初创公司",
                            "description": "固态电解质研发",
                            "is_listed": false,
                            "has_holding": true
                        }
                    ]
                })
                .to_string(),
            ),
        );
        responses.insert(
            "health",
            (200, json!({"success": true, "message": "股票分析API服务正常"}).to_string()),
        );
        Self { responses }
    }

    fn with(mut self, endpoint: &'static str, status: u16, body: Value) -> Self {
        self.responses.insert(endpoint, (status, body.to_string()));
        self
    }

    fn with_raw(mut self, endpoint: &'static str, status: u16, body: &str) -> Self {
        self.responses.insert(endpoint, (status, body.to_string()));
        self
    }
}

/// 模拟后端
struct Backend {
    script: Script,
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl Backend {
    fn respond(&self, endpoint: &str, query: HashMap<String, String>) -> HttpResponse {
        self.calls.lock().unwrap().push((endpoint.to_string(), query));
        let (status, body) = self.script.responses[endpoint].clone();
        HttpResponse::build(StatusCode::from_u16(status).unwrap())
            .content_type("application/json")
            .body(body)
    }

    fn endpoints(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(e, _)| e.clone()).collect()
    }

    fn query(&self, endpoint: &str) -> HashMap<String, String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(e, _)| e == endpoint)
            .map(|(_, q)| q.clone())
            .unwrap()
    }
}

type Query = web::Query<HashMap<String, String>>;

async fn quote(backend: web::Data<Backend>, query: Query) -> HttpResponse {
    backend.respond("quote", query.into_inner())
}

async fn history(backend: web::Data<Backend>, query: Query) -> HttpResponse {
    backend.respond("history", query.into_inner())
}

async fn sectors(backend: web::Data<Backend>, query: Query) -> HttpResponse {
    backend.respond("sectors", query.into_inner())
}

async fn search(backend: web::Data<Backend>, query: Query) -> HttpResponse {
    backend.respond("search", query.into_inner())
}

async fn health(backend: web::Data<Backend>, query: Query) -> HttpResponse {
    backend.respond("health", query.into_inner())
}

/// 启动模拟后端，返回看板和请求记录
async fn start(script: Script) -> (Dashboard, MemoryCanvas, web::Data<Backend>) {
    let backend = web::Data::new(Backend {
        script,
        calls: Mutex::new(Vec::new()),
    });

    let data = backend.clone();
    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::scope("/api")
                .route("/analysis/stock/quote", web::get().to(quote))
                .route("/analysis/stock/history", web::get().to(history))
                .route("/analysis/stock/sectors", web::get().to(sectors))
                .route("/analysis/health", web::get().to(health))
                .route("/search/stock/by-keyword", web::get().to(search)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let mut config = AppConfig::default();
    config.api.base_url = format!("http://{}/api", addr);
    let canvas = MemoryCanvas::new();
    let dashboard = Dashboard::new(&config, Box::new(canvas.clone())).unwrap();
    dashboard.initialize_on(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());

    (dashboard, canvas, backend)
}

fn select_text(html: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|e| e.text().collect::<String>())
        .collect()
}

fn section_error(dashboard: &Dashboard, target: ViewId) -> Option<String> {
    dashboard
        .snapshot()
        .section(target)
        .and_then(|s| s.error().map(|b| b.message.clone()))
}

async fn search_stock(dashboard: &Dashboard, code: &str) {
    dashboard
        .dispatch(UiEvent::Input {
            target: ViewId::StockCodeInput,
            value: code.to_string(),
        })
        .await;
    dashboard
        .dispatch(UiEvent::KeyPress {
            target: ViewId::StockCodeInput,
            key: "Enter".to_string(),
        })
        .await;
}

async fn search_scenario(dashboard: &Dashboard, keyword: &str) {
    dashboard
        .dispatch(UiEvent::Input {
            target: ViewId::ScenarioInput,
            value: keyword.to_string(),
        })
        .await;
    dashboard
        .dispatch(UiEvent::Click(ViewId::SearchScenarioBtn))
        .await;
}

// ==================== 股票查询 ====================

#[actix_web::test]
async fn stock_search_renders_quote_chart_and_sectors() {
    println!("\n========== 测试股票查询完整流程 ==========");
    let (dashboard, canvas, backend) = start(Script::new()).await;

    search_stock(&dashboard, " 600000 ").await;

    assert_eq!(backend.endpoints(), vec!["quote", "history", "sectors"]);
    assert_eq!(backend.query("quote")["symbol"], "600000");

    let history_query = backend.query("history");
    let today = dashboard.today();
    let start = NaiveDate::parse_from_str(&history_query["start_date"], "%Y-%m-%d").unwrap();
    let end = NaiveDate::parse_from_str(&history_query["end_date"], "%Y-%m-%d").unwrap();
    assert_eq!(end, today);
    assert_eq!((end - start).num_days(), 90);

    let page = dashboard.snapshot();
    assert!(page.section(ViewId::StockInfo).unwrap().is_visible());
    assert!(page.section(ViewId::StockChartContainer).unwrap().is_visible());
    assert!(page.section(ViewId::StockSectors).unwrap().is_visible());
    assert_eq!(page.button(ViewId::SearchStockBtn).unwrap().state(), ActionState::Idle);

    let html = dashboard.page_html();
    assert_eq!(select_text(&html, "#stock-info h2"), vec!["浦发银行"]);
    assert_eq!(select_text(&html, "#stock-info .stock-code"), vec!["600000"]);
    assert_eq!(select_text(&html, "#stock-info .value.negative"), vec!["↓ -1.5%"]);
    assert_eq!(select_text(&html, "#stock-sectors .sector-name"), vec!["银行"]);
    assert_eq!(select_text(&html, "#stock-sectors .concept-count"), vec!["50只"]);

    let chart = dashboard.chart_config().unwrap();
    assert_eq!(chart.data.labels, vec!["2024-01-02", "2024-01-03", "2024-01-04"]);
    assert_eq!(chart.data.datasets[0].data, vec![Some(10.2), Some(10.4), Some(10.1)]);
    assert_eq!(canvas.live_count(), 1);
    println!("✅ 股票查询完整流程测试通过！");
}

#[actix_web::test]
async fn quote_failure_shows_server_error_and_stops() {
    let script = Script::new().with(
        "quote",
        500,
        json!({"success": false, "error": "获取股票行情失败"}),
    );
    let (dashboard, canvas, backend) = start(script).await;

    search_stock(&dashboard, "999999").await;

    assert_eq!(backend.endpoints(), vec!["quote"]);
    assert_eq!(
        section_error(&dashboard, ViewId::StockTrend).as_deref(),
        Some("获取股票行情失败")
    );
    let page = dashboard.snapshot();
    assert!(!page.section(ViewId::StockInfo).unwrap().is_visible());
    assert!(page.section(ViewId::StockSectors).is_none());
    assert_eq!(page.button(ViewId::SearchStockBtn).unwrap().label(), "查询");
    assert_eq!(canvas.created_count(), 0);
}

#[actix_web::test]
async fn quote_failure_without_message_uses_default() {
    let script = Script::new().with("quote", 200, json!({"success": true, "data": null}));
    let (dashboard, _, _) = start(script).await;

    search_stock(&dashboard, "600000").await;

    assert_eq!(
        section_error(&dashboard, ViewId::StockTrend).as_deref(),
        Some("获取股票信息失败")
    );
}

#[actix_web::test]
async fn unparseable_quote_is_network_error() {
    let script = Script::new().with_raw("quote", 502, "<html>Bad Gateway</html>");
    let (dashboard, _, _) = start(script).await;

    search_stock(&dashboard, "600000").await;

    assert_eq!(
        section_error(&dashboard, ViewId::StockTrend).as_deref(),
        Some("网络请求失败，请稍后重试")
    );
}

#[actix_web::test]
async fn empty_history_hides_chart_but_loads_sectors() {
    let script = Script::new().with("history", 200, json!({"success": true, "data": []}));
    let (dashboard, canvas, backend) = start(script).await;

    search_stock(&dashboard, "600000").await;

    assert_eq!(backend.endpoints(), vec!["quote", "history", "sectors"]);
    let page = dashboard.snapshot();
    assert!(!page.section(ViewId::StockChartContainer).unwrap().is_visible());
    assert!(page.section(ViewId::StockSectors).unwrap().is_visible());
    assert!(page.section(ViewId::StockTrend).unwrap().error().is_none());
    assert_eq!(canvas.created_count(), 0);
}

#[actix_web::test]
async fn sector_failure_is_swallowed() {
    let script = Script::new().with_raw("sectors", 500, "Internal Server Error");
    let (dashboard, canvas, _) = start(script).await;

    search_stock(&dashboard, "600000").await;

    let page = dashboard.snapshot();
    assert!(page.section(ViewId::StockInfo).unwrap().is_visible());
    assert!(page.section(ViewId::StockSectors).is_none());
    assert!(page.section(ViewId::StockTrend).unwrap().error().is_none());
    assert_eq!(canvas.live_count(), 1);
}

#[actix_web::test]
async fn repeated_search_replaces_chart_and_sector_panel() {
    let (dashboard, canvas, backend) = start(Script::new()).await;

    search_stock(&dashboard, "600000").await;
    search_stock(&dashboard, "600000").await;

    assert_eq!(backend.endpoints().len(), 6);
    assert_eq!(canvas.created_count(), 2);
    assert_eq!(canvas.destroyed_count(), 1);
    assert_eq!(canvas.live_count(), 1);
    assert_eq!(
        dashboard.page_html().matches(r#"id="stock-sectors""#).count(),
        1
    );
}

#[actix_web::test]
async fn concurrent_searches_both_finish() {
    let (dashboard, canvas, backend) = start(Script::new()).await;

    // 不做去重：两次查询都会完成，最后返回的结果生效
    let (first, second) = (dashboard.clone(), dashboard.clone());
    futures::future::join(
        async move { first.search_stock("600000").await },
        async move { second.search_stock("000001").await },
    )
    .await;

    let quotes = backend.endpoints().iter().filter(|e| *e == "quote").count();
    assert_eq!(quotes, 2);
    assert_eq!(canvas.created_count(), 2);
    assert_eq!(canvas.live_count(), 1);
    let page = dashboard.snapshot();
    assert_eq!(page.button(ViewId::SearchStockBtn).unwrap().state(), ActionState::Idle);
}

#[actix_web::test]
async fn second_click_during_search_is_ignored() {
    let (dashboard, canvas, backend) = start(Script::new()).await;
    dashboard
        .dispatch(UiEvent::Input {
            target: ViewId::StockCodeInput,
            value: "600000".to_string(),
        })
        .await;

    let (first, second) = (dashboard.clone(), dashboard.clone());
    let (_, disabled_at_second_click) = futures::future::join(
        async move { first.dispatch(UiEvent::Click(ViewId::SearchStockBtn)).await },
        async move {
            tokio::task::yield_now().await;
            let disabled = second
                .snapshot()
                .button(ViewId::SearchStockBtn)
                .unwrap()
                .disabled();
            second.dispatch(UiEvent::Click(ViewId::SearchStockBtn)).await;
            disabled
        },
    )
    .await;

    assert!(disabled_at_second_click);
    let quotes = backend.endpoints().iter().filter(|e| *e == "quote").count();
    assert_eq!(quotes, 1);
    assert_eq!(canvas.created_count(), 1);
    let page = dashboard.snapshot();
    assert_eq!(page.button(ViewId::SearchStockBtn).unwrap().state(), ActionState::Idle);
}

// ==================== 场景搜索 ====================

#[actix_web::test]
async fn scenario_search_renders_cards() {
    println!("\n========== 测试场景搜索 ==========");
    let (dashboard, _, backend) = start(Script::new()).await;

    search_scenario(&dashboard, "固态 电池&储能").await;

    assert_eq!(backend.query("search")["keyword"], "固态 电池&储能");

    let html = dashboard.page_html();
    assert_eq!(select_text(&html, "#scenario-results .result-card").len(), 2);
    assert_eq!(select_text(&html, "#scenario-results .badge.listed"), vec!["已上市"]);
    assert_eq!(
        select_text(&html, "#scenario-results .stock-info"),
        vec!["股票代码: 300750"]
    );
    assert_eq!(
        select_text(&html, "#scenario-results .holding-info"),
        vec!["有上市公司持股"]
    );
    assert!(select_text(&html, "#scenario-results .spinner").is_empty());
    let page = dashboard.snapshot();
    assert_eq!(page.button(ViewId::SearchScenarioBtn).unwrap().label(), "搜索");
    println!("✅ 场景搜索测试通过！");
}

#[actix_web::test]
async fn scenario_search_accepts_wrapped_payload() {
    let script = Script::new().with(
        "search",
        200,
        json!({
            "success": true,
            "data": {
                "keyword": "银行",
                "results": [{"code": "600000", "name": "浦发银行", "price": 10.35}],
                "total": 1
            }
        }),
    );
    let (dashboard, _, _) = start(script).await;

    search_scenario(&dashboard, "银行").await;

    let html = dashboard.page_html();
    assert_eq!(select_text(&html, "#scenario-results h3"), vec!["浦发银行"]);
    assert_eq!(
        select_text(&html, "#scenario-results .result-description"),
        vec!["暂无描述"]
    );
}

#[actix_web::test]
async fn scenario_search_without_results_shows_not_found() {
    let script = Script::new().with("search", 200, json!({"success": true, "data": []}));
    let (dashboard, _, _) = start(script).await;

    search_scenario(&dashboard, "不存在的概念").await;

    assert_eq!(
        section_error(&dashboard, ViewId::ScenarioResults).as_deref(),
        Some("未找到相关公司信息")
    );
}

#[actix_web::test]
async fn empty_keyword_makes_no_request() {
    let (dashboard, _, backend) = start(Script::new()).await;

    search_scenario(&dashboard, "   ").await;

    assert!(backend.endpoints().is_empty());
    assert_eq!(
        section_error(&dashboard, ViewId::ScenarioResults).as_deref(),
        Some("请输入关键字")
    );
}

// ==================== 其他 ====================

#[actix_web::test]
async fn health_check_reports_message() {
    let (dashboard, _, backend) = start(Script::new()).await;

    let resp = dashboard.api().health().await.unwrap();
    assert!(resp.success);
    assert_eq!(resp.message.as_deref(), Some("股票分析API服务正常"));
    assert_eq!(backend.endpoints(), vec!["health"]);
}
