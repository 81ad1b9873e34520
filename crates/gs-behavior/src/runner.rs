//! The seam between decision logic and the code sandbox.

use gs_core::{AgentRng, Delta};

use crate::{BehaviorError, BehaviorResult, Perception};

/// Validates and executes user-supplied agent code.
///
/// The engine calls [`validate`](Self::validate) when code is submitted and
/// only stores code that passes.  [`run`](Self::run) is called once per
/// custom agent per tick; any `Err` degrades that agent to "no move".
///
/// # Thread safety
///
/// One runner is shared by every world instance in a process, so
/// implementations must be `Send + Sync`.
pub trait CodeRunner: Send + Sync {
    /// Static checks only; never executes the code.
    fn validate(&self, code: &str) -> BehaviorResult<()>;

    /// Execute `code` against `perception` and return the requested move.
    fn run(&self, code: &str, perception: &Perception, rng: &mut AgentRng) -> BehaviorResult<Delta>;
}

/// A [`CodeRunner`] for builds without a sandbox: every submission is
/// rejected, so custom agents never move.
pub struct NoSandbox;

impl CodeRunner for NoSandbox {
    fn validate(&self, _code: &str) -> BehaviorResult<()> {
        Err(BehaviorError::SandboxUnavailable)
    }

    fn run(&self, _code: &str, _perception: &Perception, _rng: &mut AgentRng) -> BehaviorResult<Delta> {
        Err(BehaviorError::SandboxUnavailable)
    }
}
