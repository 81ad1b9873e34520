//! Failure-containing entry point into a [`BehaviorModel`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use gs_agent::Agent;
use gs_core::AgentRng;

use crate::{BehaviorError, BehaviorModel, Intent, TickContext};

/// Ask `model` what `agent` does this tick.
///
/// Errors and panics inside the model are caught here, logged, and turned
/// into an empty intent list ("move (0, 0)").  Nothing a strategy does can
/// abort the tick or affect other agents.
pub fn decide<B: BehaviorModel + ?Sized>(
    model: &B,
    agent: &Agent,
    ctx:   &TickContext<'_>,
    rng:   &mut AgentRng,
) -> Vec<Intent> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| model.replan(agent, ctx, rng)))
        .unwrap_or_else(|payload| Err(BehaviorError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(intents) => intents,
        Err(err) => {
            warn!(
                tick  = ctx.tick.0,
                agent = %agent.id,
                kind  = %agent.kind,
                %err,
                "Decision failed; agent holds position"
            );
            Vec::new()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
