//! Read-only simulation state passed to every behavior callback.

use gs_core::Tick;
use gs_world::World;

use crate::{ClaimLog, CodeRunner};

/// A read-only view of the simulation passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// # Lifetimes
///
/// `world` is the snapshot taken at the start of the tick; it does not
/// change while the tick's agents decide, even though the live world does.
/// `claims` is borrowed fresh for each agent so it reflects every claim made
/// by agents earlier in the pass.
pub struct TickContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Start-of-tick snapshot of the whole world.
    pub world: &'a World,

    /// Claims broadcast so far this tick.
    pub claims: &'a ClaimLog,

    /// Executes custom agents' code.
    pub runner: &'a dyn CodeRunner,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        tick:   Tick,
        world:  &'a World,
        claims: &'a ClaimLog,
        runner: &'a dyn CodeRunner,
    ) -> Self {
        Self { tick, world, claims, runner }
    }
}
