#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use country_compare_wasm::application::{ChartSurface, MapSurface, Spawner};
use country_compare_wasm::domain::chart::{ChartSpec, RenderOptions};
use country_compare_wasm::domain::errors::{FetchError, RenderError};
use country_compare_wasm::domain::indicators::IndicatorKey;
use country_compare_wasm::domain::selection::{Entity, EntityCode};
use country_compare_wasm::domain::series::{FetchScope, IndicatorRepository, TimeSeriesPoint};
use futures::channel::oneshot;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

pub type SeriesResponse = Result<Vec<TimeSeriesPoint>, FetchError>;

pub fn entity(code: &str, name: &str) -> Entity {
    Entity::new(code, name).unwrap()
}

pub fn points(values: &[(&str, Option<f64>)]) -> Vec<TimeSeriesPoint> {
    values
        .iter()
        .map(|(date, value)| TimeSeriesPoint::new(date.to_string(), *value))
        .collect()
}

pub fn key(raw: &str) -> IndicatorKey {
    IndicatorKey::new(raw).unwrap()
}

/// One recorded repository call
#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub indicator: String,
    pub code: String,
    pub scope: FetchScope,
}

/// Answers immediately from a fixed table. Unknown pairs fail with a network error.
#[derive(Default)]
pub struct ScriptedRepository {
    responses: HashMap<(String, String), SeriesResponse>,
    calls: RefCell<Vec<FetchCall>>,
}

impl ScriptedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, indicator: &str, code: &str, response: SeriesResponse) -> Self {
        self.responses.insert((indicator.to_string(), code.to_string()), response);
        self
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.borrow().clone()
    }
}

impl IndicatorRepository for ScriptedRepository {
    async fn fetch_series(
        &self,
        indicator: &IndicatorKey,
        code: &EntityCode,
        scope: FetchScope,
    ) -> Result<Vec<TimeSeriesPoint>, FetchError> {
        self.calls.borrow_mut().push(FetchCall {
            indicator: indicator.value().to_string(),
            code: code.value().to_string(),
            scope,
        });
        self.responses
            .get(&(indicator.value().to_string(), code.value().to_string()))
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network(format!("no script for {}", code))))
    }
}

/// Holds every request until the test releases it through a gate.
///
/// Gates are consumed per code in the order they were opened.
#[derive(Default)]
pub struct GatedRepository {
    gates: RefCell<HashMap<String, VecDeque<oneshot::Receiver<SeriesResponse>>>>,
    calls: Cell<usize>,
}

impl GatedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self, code: &str) -> oneshot::Sender<SeriesResponse> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .borrow_mut()
            .entry(code.to_string())
            .or_default()
            .push_back(receiver);
        sender
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl IndicatorRepository for GatedRepository {
    async fn fetch_series(
        &self,
        _indicator: &IndicatorKey,
        code: &EntityCode,
        _scope: FetchScope,
    ) -> Result<Vec<TimeSeriesPoint>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        let receiver = self
            .gates
            .borrow_mut()
            .get_mut(code.value())
            .and_then(|queue| queue.pop_front());
        match receiver {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
            None => Err(FetchError::Network(format!("no gate for {}", code))),
        }
    }
}

/// What a chart surface was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Render { target: String, spec: ChartSpec },
    Placeholder { target: String, message: String },
}

#[derive(Default)]
pub struct RecordingSurface {
    calls: RefCell<Vec<SurfaceCall>>,
    failure: RefCell<Option<RenderError>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: RenderError) -> Self {
        let surface = Self::default();
        *surface.failure.borrow_mut() = Some(error);
        surface
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<ChartSpec> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Render { spec, .. } => Some(spec.clone()),
                SurfaceCall::Placeholder { .. } => None,
            })
            .collect()
    }
}

impl ChartSurface for RecordingSurface {
    fn render(&self, target: &str, spec: &ChartSpec, _options: &RenderOptions) -> Result<(), RenderError> {
        if let Some(error) = self.failure.borrow().clone() {
            return Err(error);
        }
        self.calls.borrow_mut().push(SurfaceCall::Render {
            target: target.to_string(),
            spec: spec.clone(),
        });
        Ok(())
    }

    fn show_placeholder(&self, target: &str, message: &str) -> Result<(), RenderError> {
        self.calls.borrow_mut().push(SurfaceCall::Placeholder {
            target: target.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Marker { code: String, selected: bool },
    Tooltip { text: String, left: f64, top: f64 },
    HideTooltip,
}

#[derive(Default)]
pub struct RecordingMapSurface {
    calls: RefCell<Vec<MapCall>>,
}

impl RecordingMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<MapCall> {
        self.calls.borrow().clone()
    }

    /// Codes whose last marker update was "selected", sorted
    pub fn marked(&self) -> Vec<String> {
        let mut state: HashMap<String, bool> = HashMap::new();
        for call in self.calls.borrow().iter() {
            if let MapCall::Marker { code, selected } = call {
                state.insert(code.clone(), *selected);
            }
        }
        let mut codes: Vec<String> = state.into_iter().filter(|(_, on)| *on).map(|(code, _)| code).collect();
        codes.sort();
        codes
    }
}

impl MapSurface for RecordingMapSurface {
    fn set_region_selected(&self, code: &EntityCode, selected: bool) {
        self.calls.borrow_mut().push(MapCall::Marker {
            code: code.value().to_string(),
            selected,
        });
    }

    fn show_tooltip(&self, text: &str, left: f64, top: f64) {
        self.calls.borrow_mut().push(MapCall::Tooltip {
            text: text.to_string(),
            left,
            top,
        });
    }

    fn hide_tooltip(&self) {
        self.calls.borrow_mut().push(MapCall::HideTooltip);
    }
}

/// Spawner that queues passes on `pool` instead of running them inline
pub fn pool_spawner(pool: &LocalPool) -> Spawner {
    let spawner = pool.spawner();
    Rc::new(move |fut| {
        spawner.spawn_local(fut).unwrap();
    })
}
