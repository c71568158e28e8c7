//! 场景搜索流程

use crate::dashboard::Dashboard;
use crate::models::ScenarioPayload;
use crate::view::page::ViewId;
use crate::view::render;

use super::stock::NETWORK_FAILED;

const EMPTY_KEYWORD: &str = "请输入关键字";
const NOT_FOUND: &str = "未找到相关公司信息";

impl Dashboard {
    /// 按关键字搜索相关企业
    pub async fn search_scenario(&self, keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.show_error(ViewId::ScenarioResults, EMPTY_KEYWORD);
            return;
        }

        let _busy = self.busy(ViewId::SearchScenarioBtn);
        log::info!("搜索相关企业: {}", keyword);

        if let Some(section) = self.page().section_mut(ViewId::ScenarioResults) {
            section.set_content(render::loading_html());
            section.show();
        }

        match self.api().search_by_keyword(keyword).await {
            Ok(response) => {
                let message = response.error_or(NOT_FOUND);
                let results = response
                    .into_data()
                    .map(ScenarioPayload::into_results)
                    .filter(|items| !items.is_empty());
                match results {
                    Some(items) => self.render_scenario_results(&items),
                    // 加载提示保留在错误提示下方
                    None => self.show_error(ViewId::ScenarioResults, &message),
                }
            }
            Err(e) => {
                self.show_error(ViewId::ScenarioResults, NETWORK_FAILED);
                log::error!("搜索相关企业失败: {:#}", e);
            }
        }
    }
}
