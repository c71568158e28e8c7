use crate::dashboard::Dashboard;
use crate::view::page::TabId;

impl Dashboard {
    /// 切换标签页
    pub fn switch_tab(&self, tab: TabId) {
        self.page().activate_tab(tab);
        log::debug!("切换到标签页 {}", tab.as_str());
    }
}
