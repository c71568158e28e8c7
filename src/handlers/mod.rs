//! 页面事件处理
//!
//! 事件绑定表在初始化时建立，分发时按表查找对应动作

pub mod scenario;
pub mod stock;
pub mod tabs;

use std::collections::HashMap;

use crate::dashboard::Dashboard;
use crate::view::page::{Button, TabId, ViewId};

/// 页面事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// 点击元素
    Click(ViewId),
    /// 在输入框中按键
    KeyPress { target: ViewId, key: String },
    /// 点击标签按钮
    TabClick(TabId),
    /// 修改输入框内容
    Input { target: ViewId, value: String },
}

/// 事件触发的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SwitchTab(TabId),
    SearchStock,
    SearchScenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Trigger {
    Click(ViewId),
    Enter(ViewId),
    Tab(TabId),
}

impl Trigger {
    fn from_event(event: &UiEvent) -> Option<Self> {
        match event {
            UiEvent::Click(target) => Some(Trigger::Click(*target)),
            UiEvent::KeyPress { target, key } if key == "Enter" => Some(Trigger::Enter(*target)),
            UiEvent::TabClick(tab) => Some(Trigger::Tab(*tab)),
            _ => None,
        }
    }
}

/// 事件绑定表
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    routes: HashMap<Trigger, Action>,
}

impl Bindings {
    /// 看板的标准绑定：标签切换、股票查询、场景搜索
    pub fn standard() -> Self {
        let mut bindings = Self::default();
        for tab in TabId::ALL {
            bindings.bind(Trigger::Tab(tab), Action::SwitchTab(tab));
        }
        bindings.bind(Trigger::Click(ViewId::SearchStockBtn), Action::SearchStock);
        bindings.bind(Trigger::Enter(ViewId::StockCodeInput), Action::SearchStock);
        bindings.bind(Trigger::Click(ViewId::SearchScenarioBtn), Action::SearchScenario);
        bindings.bind(Trigger::Enter(ViewId::ScenarioInput), Action::SearchScenario);
        bindings
    }

    fn bind(&mut self, trigger: Trigger, action: Action) {
        self.routes.insert(trigger, action);
    }

    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        Trigger::from_event(event).and_then(|t| self.routes.get(&t).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Dashboard {
    /// 分发页面事件
    ///
    /// 输入事件直接写入输入框；其余事件按绑定表执行，未绑定的事件忽略。
    /// 禁用中的按钮不响应点击，输入框回车不受影响。
    pub async fn dispatch(&self, event: UiEvent) {
        match &event {
            UiEvent::Input { target, value } => {
                if !self.page().set_input(*target, value) {
                    log::debug!("元素 {} 不是输入框", target);
                }
                return;
            }
            UiEvent::Click(target) => {
                let disabled = self.page().button(*target).map_or(false, Button::disabled);
                if disabled {
                    log::debug!("按钮 {} 处于禁用状态，忽略点击", target);
                    return;
                }
            }
            _ => {}
        }

        let action = match self.bindings().resolve(&event) {
            Some(action) => action,
            None => {
                log::debug!("未绑定的事件: {:?}", event);
                return;
            }
        };

        match action {
            Action::SwitchTab(tab) => self.switch_tab(tab),
            Action::SearchStock => {
                let code = self.input_value(ViewId::StockCodeInput);
                self.search_stock(&code).await;
            }
            Action::SearchScenario => {
                let keyword = self.input_value(ViewId::ScenarioInput);
                self.search_scenario(&keyword).await;
            }
        }
    }

    fn input_value(&self, id: ViewId) -> String {
        self.page().input(id).unwrap_or_default().to_string()
    }
}
