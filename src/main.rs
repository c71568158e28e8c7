//! 股票看板命令行入口
//!
//! 从标准输入读取操作，每次操作后输出页面 HTML：
//! - `stock <代码>`：查询股票
//! - `scenario <关键字>`：场景搜索
//! - `tab stock|scenario`：切换标签页
//! - `quit`：退出

use env_logger::Env;
use tokio::io::{AsyncBufReadExt, BufReader};

use stockshark_dashboard::config::AppConfig;
use stockshark_dashboard::view::{MemoryCanvas, TabId, ViewId};
use stockshark_dashboard::{Dashboard, UiEvent};

/// 一行输入对应的页面事件
fn parse_command(line: &str) -> Option<Vec<UiEvent>> {
    let line = line.trim();
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    let arg = arg.trim().to_string();

    let events = match command {
        "stock" => vec![
            UiEvent::Input { target: ViewId::StockCodeInput, value: arg },
            UiEvent::Click(ViewId::SearchStockBtn),
        ],
        "scenario" => vec![
            UiEvent::Input { target: ViewId::ScenarioInput, value: arg },
            UiEvent::KeyPress { target: ViewId::ScenarioInput, key: "Enter".to_string() },
        ],
        "tab" => match arg.as_str() {
            "stock" => vec![UiEvent::TabClick(TabId::StockTrend)],
            "scenario" => vec![UiEvent::TabClick(TabId::ScenarioSearch)],
            _ => return None,
        },
        _ => return None,
    };
    Some(events)
}

/// 应用程序入口
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    log::info!("启动股票看板，后端地址: {}", config.api.base_url);

    let canvas = MemoryCanvas::new();
    let dashboard = Dashboard::new(&config, Box::new(canvas.clone()))?;

    match dashboard.api().health().await {
        Ok(resp) if resp.success => {
            log::info!("后端服务正常: {}", resp.message.unwrap_or_default());
        }
        Ok(resp) => log::warn!("后端服务状态异常: {}", resp.error_or("未知错误")),
        Err(e) => log::warn!("后端健康检查失败: {:#}", e),
    }

    dashboard.initialize();
    println!("{}", dashboard.page_html());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "quit" {
            break;
        }
        let events = match parse_command(&line) {
            Some(events) => events,
            None => {
                eprintln!("用法: stock <代码> | scenario <关键字> | tab stock|scenario | quit");
                continue;
            }
        };

        for event in events {
            dashboard.dispatch(event).await;
        }

        println!("{}", dashboard.page_html());
        if let Some(chart) = canvas.latest() {
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
    }

    log::info!("看板退出");
    Ok(())
}
