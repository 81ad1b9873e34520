//! `WasmSandbox`, the wasmtime-backed [`CodeRunner`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;
use wasmtime::{Engine, InstancePre, Linker, Store, StoreLimitsBuilder, Trap};

use gs_behavior::{BehaviorResult, CodeRunner, Perception};
use gs_core::{AgentRng, Delta};

use crate::cache::ModuleCache;
use crate::scope::{self, HostState};
use crate::validate::{self, ENTRY};
use crate::{SandboxConfig, SandboxError, SandboxResult};

/// Epoch ticker period; the wall-clock deadline is counted in these.
const EPOCH_PERIOD: Duration = Duration::from_millis(1);

/// Validates and runs custom agent code.
///
/// One instance is meant to be shared (behind an `Arc`) by every world in a
/// process.  Compiled modules are cached across calls and across worlds.
pub struct WasmSandbox {
    config: SandboxConfig,
    engine: Engine,
    linker: Linker<HostState>,
    cache:  Mutex<ModuleCache>,
    _ticker: EpochTicker,
}

impl fmt::Debug for WasmSandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmSandbox").field("config", &self.config).finish()
    }
}

impl WasmSandbox {
    pub fn new(config: SandboxConfig) -> SandboxResult<Self> {
        let mut engine_config = wasmtime::Config::new();
        engine_config.consume_fuel(true);
        engine_config.epoch_interruption(true);
        let engine = Engine::new(&engine_config).map_err(|e| SandboxError::Engine(e.to_string()))?;
        let linker = scope::link(&engine).map_err(|e| SandboxError::Engine(e.to_string()))?;
        let cache = Mutex::new(ModuleCache::new(config.max_cache_entries));
        let ticker = EpochTicker::start(engine.clone(), EPOCH_PERIOD);
        Ok(Self { config, engine, linker, cache, _ticker: ticker })
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Number of compiled modules currently cached.
    pub fn cached_modules(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Static validation without running anything.  Passing code is compiled
    /// and cached, so the first tick does not pay for it.
    pub fn check(&self, code: &str) -> SandboxResult<()> {
        self.prepare(code).map(|_| ())
    }

    /// Static validation plus linking; cached on success.
    fn prepare(&self, code: &str) -> SandboxResult<InstancePre<HostState>> {
        if let Some(pre) = self.cache.lock().unwrap_or_else(PoisonError::into_inner).get(code) {
            return Ok(pre);
        }

        let wasm = validate::parse(code, &self.config)?;
        let module = validate::compile(&self.engine, &wasm)?;
        let pre = self
            .linker
            .instantiate_pre(&module)
            .map_err(|e| SandboxError::Link(e.to_string()))?;

        debug!(bytes = code.len(), "Compiled custom module");
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(code, pre.clone());
        Ok(pre)
    }

    /// Run `decide` once and return the raw (unclamped) delta.
    pub fn execute(&self, code: &str, perception: &Perception, rng: &mut AgentRng) -> SandboxResult<Delta> {
        let pre = self.prepare(code)?;

        let state = HostState {
            perception: perception.clone(),
            rng:        rng.fork(),
            limits:     StoreLimitsBuilder::new()
                .memory_size(self.config.max_memory_bytes)
                .instances(1)
                .build(),
        };
        let mut store = Store::new(&self.engine, state);
        store.limiter(|s| &mut s.limits);
        store.set_fuel(self.config.max_fuel).map_err(|e| SandboxError::Engine(e.to_string()))?;
        store.set_epoch_deadline(self.config.max_call_ms.max(1));

        let instance = pre.instantiate(&mut store).map_err(call_error)?;

        let (dx, dy) = if let Ok(f) = instance.get_typed_func::<(), (i32, i32)>(&mut store, ENTRY) {
            f.call(&mut store, ()).map_err(call_error)?
        } else if let Ok(f) = instance.get_typed_func::<(), i64>(&mut store, ENTRY) {
            unpack(f.call(&mut store, ()).map_err(call_error)?)
        } else {
            return Err(SandboxError::WrongShape(
                "expected `() -> (i32, i32)` or `() -> i64`".to_owned(),
            ));
        };

        Ok(Delta::new(dx, dy))
    }
}

impl CodeRunner for WasmSandbox {
    fn validate(&self, code: &str) -> BehaviorResult<()> {
        self.check(code).map_err(Into::into)
    }

    fn run(&self, code: &str, perception: &Perception, rng: &mut AgentRng) -> BehaviorResult<Delta> {
        self.execute(code, perception, rng).map_err(Into::into)
    }
}

/// Split a packed result: `dx` in the low 32 bits, `dy` in the high 32.
pub(crate) fn unpack(packed: i64) -> (i32, i32) {
    (packed as i32, (packed >> 32) as i32)
}

fn call_error(err: wasmtime::Error) -> SandboxError {
    match err.downcast_ref::<Trap>() {
        Some(Trap::OutOfFuel | Trap::Interrupt) => SandboxError::Timeout,
        Some(trap) => SandboxError::Trap(trap.to_string()),
        None => SandboxError::Trap(err.to_string()),
    }
}

// ── EpochTicker ───────────────────────────────────────────────────────────────

/// Background thread advancing the engine epoch.  Stopped and joined on drop.
struct EpochTicker {
    stop:   Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl EpochTicker {
    fn start(engine: Engine, period: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("gs-sandbox-epoch".to_owned())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    thread::sleep(period);
                    engine.increment_epoch();
                }
            })
            .ok();
        Self { stop, handle }
    }
}

impl Drop for EpochTicker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
