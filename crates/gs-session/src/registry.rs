//! Map from session key to an independently lockable world.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::info;

use gs_behavior::CodeRunner;
use gs_core::GridDims;
use gs_sim::{Sim, SimBuilder, SimConfig, TickOutcome};

use crate::{SessionError, SessionId, SessionResult};

/// One world, shared between its driver and anyone inspecting it.
pub type SharedSim = Arc<Mutex<Sim>>;

/// Lock a session's world.  A panic while another holder had it locked
/// leaves the world in a consistent between-tick state, so the poison flag
/// is ignored.
pub fn lock_sim(sim: &SharedSim) -> MutexGuard<'_, Sim> {
    sim.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Every live session.
///
/// New sessions start from the registry's template configuration and grid
/// size.  All of them share one [`CodeRunner`], and with it the runner's
/// compiled-module cache.
pub struct SessionRegistry {
    template: SimConfig,
    dims:     GridDims,
    runner:   Arc<dyn CodeRunner>,
    sessions: RwLock<BTreeMap<SessionId, SharedSim>>,
}

impl SessionRegistry {
    pub fn new(template: SimConfig, dims: GridDims, runner: Arc<dyn CodeRunner>) -> SessionResult<Self> {
        template.validate()?;
        Ok(Self { template, dims, runner, sessions: RwLock::new(BTreeMap::new()) })
    }

    fn build(&self) -> SessionResult<SharedSim> {
        let sim = SimBuilder::new(self.template.clone())
            .dims(self.dims)
            .runner(Arc::clone(&self.runner))
            .build()?;
        Ok(Arc::new(Mutex::new(sim)))
    }

    /// Create a fresh, empty, paused session.
    pub fn create(&self, id: SessionId) -> SessionResult<SharedSim> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if sessions.contains_key(&id) {
            return Err(SessionError::Exists(id));
        }
        let sim = self.build()?;
        sessions.insert(id.clone(), Arc::clone(&sim));
        info!(session = %id, total = sessions.len(), "Session created");
        Ok(sim)
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedSim> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).get(id).cloned()
    }

    /// Existing session, or a new one if `id` is unknown.
    pub fn get_or_create(&self, id: SessionId) -> SessionResult<SharedSim> {
        if let Some(sim) = self.get(&id) {
            return Ok(sim);
        }
        match self.create(id.clone()) {
            Err(SessionError::Exists(_)) => self.get(&id).ok_or(SessionError::NotFound(id)),
            other => other,
        }
    }

    /// Release a session.  Its world is freed once the last handle drops.
    pub fn evict(&self, id: &SessionId) -> Option<SharedSim> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let removed = sessions.remove(id);
        if removed.is_some() {
            info!(session = %id, total = sessions.len(), "Session evicted");
        }
        removed
    }

    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Step every running session once.  Paused sessions are skipped.
    ///
    /// With the `parallel` feature sessions step on Rayon's thread pool.
    /// Each world is locked by exactly one worker, so no tick overlaps
    /// another tick of the same world.
    pub fn step_all(&self) -> Vec<(SessionId, TickOutcome)> {
        let entries: Vec<(SessionId, SharedSim)> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, sim)| (id.clone(), Arc::clone(sim)))
            .collect();

        let step = |(id, sim): &(SessionId, SharedSim)| {
            let mut sim = lock_sim(sim);
            sim.is_running().then(|| (id.clone(), sim.step()))
        };

        #[cfg(not(feature = "parallel"))]
        {
            entries.iter().filter_map(step).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            entries.par_iter().filter_map(step).collect()
        }
    }
}
