use std::cell::{Cell, RefCell};
use std::rc::Rc;

use derive_more::{Display, From};
use futures::future::LocalBoxFuture;

use crate::application::fetcher::DataFetcher;
use crate::domain::chart::{ChartAssembler, ChartSpec, PanelState, RenderOptions};
use crate::domain::controls::ViewSnapshot;
use crate::domain::errors::RenderError;
use crate::domain::events::Subscribers;
use crate::domain::indicators::{ChartType, IndicatorKey, IndicatorRegistry};
use crate::domain::logging::{LogComponent, LogContext, get_logger};
use crate::domain::selection::Entity;
use crate::domain::series::{FetchScope, IndicatorRepository};
use crate::{log_debug, log_error, log_info, log_warn};

/// Runs a detached pass on the current thread's executor
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

#[cfg(not(target_arch = "wasm32"))]
fn spawn_async(fut: LocalBoxFuture<'static, ()>) {
    futures::executor::block_on(fut);
}

#[cfg(target_arch = "wasm32")]
fn spawn_async(fut: LocalBoxFuture<'static, ()>) {
    wasm_bindgen_futures::spawn_local(fut);
}

/// The browser microtask queue on wasm32, a blocking run on the host.
pub fn default_spawner() -> Spawner {
    Rc::new(spawn_async)
}

/// Draws chart specs. Implemented by the Plotly adapter in the browser.
pub trait ChartSurface {
    fn render(&self, target: &str, spec: &ChartSpec, options: &RenderOptions) -> Result<(), RenderError>;
    fn show_placeholder(&self, target: &str, message: &str) -> Result<(), RenderError>;
}

/// Monotonic id of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From)]
#[display(fmt = "pass#{}", _0)]
pub struct PassVersion(u64);

impl PassVersion {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Inputs of one pass, frozen when the pass starts
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub version: PassVersion,
    pub selection: Vec<Entity>,
    pub indicator: IndicatorKey,
    pub chart_type: ChartType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    Hidden,
    Rendered { spec: ChartSpec, failed: Vec<Entity> },
    NoData { message: String },
    /// Superseded by a newer pass before its data arrived; nothing was drawn.
    Stale { version: PassVersion },
    Failed { error: RenderError },
}

struct Inner<R, S> {
    fetcher: DataFetcher<R>,
    assembler: ChartAssembler,
    surface: S,
    options: RenderOptions,
    spawner: Spawner,
    version: Cell<u64>,
    state: RefCell<PanelState>,
    observers: RefCell<Subscribers<PanelState>>,
}

/// Turns selection and view changes into chart renders.
///
/// Each pass captures a fresh [`PassVersion`]. When its fetch settles the pass
/// only applies its result if no newer pass or panel close happened meanwhile.
pub struct RenderCoordinator<R, S> {
    inner: Rc<Inner<R, S>>,
}

impl<R, S> Clone for RenderCoordinator<R, S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<R, S> RenderCoordinator<R, S>
where
    R: IndicatorRepository + 'static,
    S: ChartSurface + 'static,
{
    pub fn new(
        fetcher: DataFetcher<R>,
        assembler: ChartAssembler,
        surface: S,
        options: RenderOptions,
        spawner: Spawner,
    ) -> Self {
        get_logger().info(
            LogComponent::Application("RenderCoordinator"),
            &format!("Render coordinator targeting #{}", options.target),
        );

        Self {
            inner: Rc::new(Inner {
                fetcher,
                assembler,
                surface,
                options,
                spawner,
                version: Cell::new(0),
                state: RefCell::new(PanelState::Idle),
                observers: RefCell::new(Subscribers::new()),
            }),
        }
    }

    /// Starts a pass in the background.
    pub fn trigger(&self, selection: &[Entity], view: &ViewSnapshot) {
        if let Some(request) = self.begin(selection, view) {
            let this = self.clone();
            (self.inner.spawner)(Box::pin(async move {
                this.execute(request).await;
            }));
        }
    }

    /// Starts a pass and waits for it.
    pub async fn run(&self, selection: &[Entity], view: &ViewSnapshot) -> PassOutcome {
        match self.begin(selection, view) {
            Some(request) => self.execute(request).await,
            None => PassOutcome::Hidden,
        }
    }

    /// Claims a new version and moves the panel out of its previous state.
    /// Returns `None` for an empty selection, which only hides the panel.
    pub fn begin(&self, selection: &[Entity], view: &ViewSnapshot) -> Option<RenderRequest> {
        let version = self.next_version();

        if selection.is_empty() {
            log_debug!(
                LogComponent::Application("RenderCoordinator"),
                ctx = LogContext::pass(version.value());
                "empty selection, hiding panel"
            );
            self.set_state(PanelState::Hidden);
            return None;
        }

        let name = self.registry().display_name(&view.indicator);
        let message = match view.chart_type {
            ChartType::Pie => format!("Loading latest {} data...", name),
            ChartType::Line | ChartType::Bar => format!("Loading {} data for {} countries...", name, selection.len()),
        };
        self.set_state(PanelState::Fetching { message });

        Some(RenderRequest {
            version,
            selection: selection.to_vec(),
            indicator: view.indicator.clone(),
            chart_type: view.chart_type,
        })
    }

    /// Fetches, checks staleness, assembles and draws one captured request.
    pub async fn execute(&self, request: RenderRequest) -> PassOutcome {
        let scope = FetchScope::for_chart_type(request.chart_type);
        let report = self
            .inner
            .fetcher
            .fetch_all(&request.indicator, &request.selection, scope)
            .await;

        if !self.is_current(request.version) {
            log_debug!(
                LogComponent::Application("RenderCoordinator"),
                ctx = LogContext::pass(request.version.value());
                "superseded by pass#{}, discarding",
                self.inner.version.get()
            );
            return PassOutcome::Stale { version: request.version };
        }

        if report.all_failed() {
            log_warn!(
                LogComponent::Application("RenderCoordinator"),
                ctx = LogContext::pass(request.version.value());
                "every {} request failed",
                request.indicator
            );
        }

        let spec = self
            .inner
            .assembler
            .assemble(request.chart_type, &request.indicator, &report.successes());
        let target = self.inner.options.target.as_str();

        if let ChartSpec::NoData(placeholder) = &spec {
            return match self.inner.surface.show_placeholder(target, &placeholder.message) {
                Ok(()) => {
                    self.set_state(PanelState::NoData {
                        message: placeholder.message.clone(),
                    });
                    PassOutcome::NoData {
                        message: placeholder.message.clone(),
                    }
                }
                Err(error) => self.fail(request.version, error),
            };
        }

        match self.inner.surface.render(target, &spec, &self.inner.options) {
            Ok(()) => {
                log_info!(
                    LogComponent::Application("RenderCoordinator"),
                    ctx = LogContext::pass(request.version.value());
                    "rendered '{}' ({} entities)",
                    spec.title(),
                    spec.entity_count()
                );
                let failed = report.failures().into_iter().map(|(entity, _)| entity.clone()).collect();
                self.set_state(PanelState::Rendered(spec.clone()));
                PassOutcome::Rendered { spec, failed }
            }
            Err(error) => self.fail(request.version, error),
        }
    }

    /// Hides the panel and invalidates any pass in flight. The selection is kept.
    pub fn close_panel(&self) {
        let version = self.next_version();
        log_debug!(
            LogComponent::Application("RenderCoordinator"),
            ctx = LogContext::pass(version.value());
            "panel closed"
        );
        self.set_state(PanelState::Hidden);
    }

    pub fn state(&self) -> PanelState {
        self.inner.state.borrow().clone()
    }

    pub fn current_version(&self) -> PassVersion {
        PassVersion(self.inner.version.get())
    }

    pub fn registry(&self) -> &IndicatorRegistry {
        self.inner.assembler.registry()
    }

    pub fn options(&self) -> &RenderOptions {
        &self.inner.options
    }

    pub fn fetcher(&self) -> &DataFetcher<R> {
        &self.inner.fetcher
    }

    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    /// Observers see every panel state change, in order.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&PanelState) + 'static,
    {
        self.inner.observers.borrow_mut().subscribe(observer);
    }

    fn next_version(&self) -> PassVersion {
        let next = self.inner.version.get() + 1;
        self.inner.version.set(next);
        PassVersion(next)
    }

    fn is_current(&self, version: PassVersion) -> bool {
        self.inner.version.get() == version.value()
    }

    fn fail(&self, version: PassVersion, error: RenderError) -> PassOutcome {
        log_error!(
            LogComponent::Application("RenderCoordinator"),
            ctx = LogContext::pass(version.value());
            "chart render failed: {}",
            error
        );
        self.set_state(PanelState::Failed {
            message: format!("Could not draw chart: {}", error),
        });
        PassOutcome::Failed { error }
    }

    fn set_state(&self, state: PanelState) {
        *self.inner.state.borrow_mut() = state.clone();
        self.inner.observers.borrow().publish(&state);
    }
}
