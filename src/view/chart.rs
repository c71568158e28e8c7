//! 股价走势图
//!
//! 图表库本身是外部组件，这里只负责生成折线图配置，并持有唯一的图表实例。
//! 重绘前必须先销毁旧实例。

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::HistoryPoint;

/// 画布元素 id
pub const CANVAS_ID: &str = "stock-chart";

/// 折线数据集
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

/// 折线图配置，序列化结果可直接交给 Chart.js
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: Value,
    /// 成交量随图保留，不单独绘制
    #[serde(skip)]
    pub volumes: Vec<Option<f64>>,
}

impl LineChartConfig {
    /// 以日期为横轴、收盘价为纵轴生成折线图
    pub fn closing_prices(points: &[HistoryPoint]) -> Self {
        let labels = points.iter().map(HistoryPoint::date).collect();
        let prices = points.iter().map(HistoryPoint::close).collect();
        let volumes = points.iter().map(HistoryPoint::volume).collect();

        Self {
            kind: "line".to_string(),
            data: ChartData {
                labels,
                datasets: vec![LineDataset {
                    label: "收盘价".to_string(),
                    data: prices,
                    border_color: "rgb(102, 126, 234)".to_string(),
                    background_color: "rgba(102, 126, 234, 0.1)".to_string(),
                    border_width: 2,
                    fill: true,
                    tension: 0.4,
                }],
            },
            options: json!({
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "display": true, "position": "top" },
                    "tooltip": { "mode": "index", "intersect": false }
                },
                "scales": {
                    "x": { "display": true, "title": { "display": true, "text": "日期" } },
                    "y": { "display": true, "title": { "display": true, "text": "价格" } }
                }
            }),
            volumes,
        }
    }
}

/// 图表实例编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChartInstanceId(pub u64);

/// 图表库接口
pub trait ChartRenderer: Send {
    /// 在画布上创建图表实例
    fn create(&mut self, canvas: &str, config: &LineChartConfig) -> Result<ChartInstanceId>;

    /// 销毁图表实例，释放画布
    fn destroy(&mut self, id: ChartInstanceId);
}

/// 看板持有的走势图
///
/// 同一时间最多一个存活实例
pub struct StockChart {
    renderer: Box<dyn ChartRenderer>,
    current: Option<(ChartInstanceId, LineChartConfig)>,
}

impl StockChart {
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self {
            renderer,
            current: None,
        }
    }

    /// 先销毁旧实例，再用新配置创建
    pub fn replace(&mut self, config: LineChartConfig) -> Result<ChartInstanceId> {
        self.dispose();
        let id = self.renderer.create(CANVAS_ID, &config)?;
        self.current = Some((id, config));
        Ok(id)
    }

    /// 销毁当前实例（如有）
    pub fn dispose(&mut self) {
        if let Some((id, _)) = self.current.take() {
            log::debug!("销毁走势图实例 {:?}", id);
            self.renderer.destroy(id);
        }
    }

    pub fn config(&self) -> Option<&LineChartConfig> {
        self.current.as_ref().map(|(_, config)| config)
    }

    pub fn instance(&self) -> Option<ChartInstanceId> {
        self.current.as_ref().map(|(id, _)| *id)
    }
}

impl Drop for StockChart {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Debug, Default)]
struct CanvasState {
    next_id: u64,
    live: BTreeMap<ChartInstanceId, LineChartConfig>,
    created: usize,
    destroyed: usize,
}

/// 内存画布
///
/// 记录实例的创建与销毁，克隆后共享同一份状态
#[derive(Debug, Clone, Default)]
pub struct MemoryCanvas {
    state: Arc<Mutex<CanvasState>>,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前存活的实例数
    pub fn live_count(&self) -> usize {
        self.state().live.len()
    }

    pub fn created_count(&self) -> usize {
        self.state().created
    }

    pub fn destroyed_count(&self) -> usize {
        self.state().destroyed
    }

    /// 最近创建且仍存活的实例配置
    pub fn latest(&self) -> Option<LineChartConfig> {
        self.state().live.values().next_back().cloned()
    }
}

impl ChartRenderer for MemoryCanvas {
    fn create(&mut self, canvas: &str, config: &LineChartConfig) -> Result<ChartInstanceId> {
        let mut state = self.state();
        state.next_id += 1;
        let id = ChartInstanceId(state.next_id);
        state.live.insert(id, config.clone());
        state.created += 1;
        log::debug!(
            "在画布 {} 上创建走势图 {:?}，共 {} 个点",
            canvas,
            id,
            config.data.labels.len()
        );
        Ok(id)
    }

    fn destroy(&mut self, id: ChartInstanceId) {
        let mut state = self.state();
        if state.live.remove(&id).is_some() {
            state.destroyed += 1;
        }
    }
}
