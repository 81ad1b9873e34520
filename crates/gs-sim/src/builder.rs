//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use gs_behavior::{BehaviorModel, CodeRunner, KindDispatch, NoSandbox};
use gs_core::GridDims;

use crate::{Sim, SimConfig, SimResult};

/// Fluent builder for [`Sim<B>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                  |
/// |------------------|------------------------------------------|
/// | `.dims(d)`       | 25 × 25                                  |
/// | `.runner(r)`     | `NoSandbox` (custom code always rejected)|
/// | `.behavior(b)`   | `KindDispatch`                           |
///
/// # Example
///
/// ```rust,ignore
/// let sandbox: Arc<dyn CodeRunner> = Arc::new(WasmSandbox::new(SandboxConfig::default())?);
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .dims(GridDims::new(40, 30)?)
///     .runner(sandbox)
///     .build()?;
/// sim.apply(Command::Start);
/// ```
pub struct SimBuilder<B: BehaviorModel = KindDispatch> {
    config:   SimConfig,
    dims:     GridDims,
    runner:   Arc<dyn CodeRunner>,
    behavior: B,
}

impl SimBuilder<KindDispatch> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            dims:     GridDims::default(),
            runner:   Arc::new(NoSandbox),
            behavior: KindDispatch,
        }
    }
}

impl<B: BehaviorModel> SimBuilder<B> {
    pub fn dims(mut self, dims: GridDims) -> Self {
        self.dims = dims;
        self
    }

    /// Executor for custom agent code.  Share one runner across sims to
    /// share its compiled-module cache.
    pub fn runner(mut self, runner: Arc<dyn CodeRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the decision model, e.g. with a test double.
    pub fn behavior<B2: BehaviorModel>(self, behavior: B2) -> SimBuilder<B2> {
        SimBuilder {
            config: self.config,
            dims:   self.dims,
            runner: self.runner,
            behavior,
        }
    }

    /// Validate the configuration and return an empty, paused [`Sim`].
    pub fn build(self) -> SimResult<Sim<B>> {
        self.config.validate()?;
        Ok(Sim::assemble(self.config, self.dims, self.behavior, self.runner))
    }
}
