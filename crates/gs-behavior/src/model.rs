//! The `BehaviorModel` trait and the default per-kind dispatcher.

use gs_agent::Agent;
use gs_core::{AgentRng, BehaviorKind};

use crate::strategy::{collector, competitive, cooperative, custom, explorer, q_learning, reactive};
use crate::{BehaviorResult, Intent, TickContext};

/// Pluggable agent behavior.
///
/// Implementations are pure functions of `(agent, ctx, rng)`: everything an
/// agent wants to change comes back as [`Intent`]s.  Returning `Err` (or
/// panicking) is allowed and means "this agent does nothing this tick"; the
/// engine contains both through [`decide`][crate::decide].
///
/// # Thread safety
///
/// A model is shared by every world instance that uses it, so it must be
/// `Send + Sync` and keep per-agent state in the agent, not in itself.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per live agent per tick.
    ///
    /// An empty `Vec` means "stay put".
    fn replan(
        &self,
        agent: &Agent,
        ctx:   &TickContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorResult<Vec<Intent>>;
}

/// The default model: the agent's [`BehaviorKind`] selects one strategy
/// function.  The match is exhaustive, so adding a kind without a strategy
/// does not compile.
#[derive(Copy, Clone, Debug, Default)]
pub struct KindDispatch;

impl BehaviorModel for KindDispatch {
    fn replan(
        &self,
        agent: &Agent,
        ctx:   &TickContext<'_>,
        rng:   &mut AgentRng,
    ) -> BehaviorResult<Vec<Intent>> {
        match agent.kind {
            BehaviorKind::Reactive    => reactive::decide(agent, ctx, rng),
            BehaviorKind::Explorer    => explorer::decide(agent, ctx, rng),
            BehaviorKind::Collector   => collector::decide(agent, ctx, rng),
            BehaviorKind::Cooperative => cooperative::decide(agent, ctx, rng),
            BehaviorKind::Competitive => competitive::decide(agent, ctx, rng),
            BehaviorKind::QLearning   => q_learning::decide(agent, ctx, rng),
            BehaviorKind::Custom      => custom::decide(agent, ctx, rng),
        }
    }
}
