//! Custom: delegate to the sandbox.
//!
//! An agent without stored code does nothing.  Any sandbox failure comes
//! back as `Err` and is contained by the dispatcher.

use gs_agent::Agent;
use gs_core::AgentRng;

use crate::{BehaviorResult, Intent, Perception, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    let Some(code) = agent.memory.code.as_deref() else {
        return Ok(Vec::new());
    };
    let perception = Perception::of(agent, ctx.world);
    let step = ctx.runner.run(code, &perception, rng)?.clamp_unit();
    Ok(if step.is_zero() { Vec::new() } else { vec![Intent::Move(step)] })
}
