//! Seeded random streams.
//!
//! Every agent draws from its own `SmallRng`, seeded as
//! `run_seed ^ (agent_id * φ64)` where φ64 is the 64-bit fractional golden
//! ratio.  Consecutive ids land far apart in seed space, and placing or
//! removing an agent never shifts another agent's sequence, so replaying
//! the same commands replays the same run.
//!
//! World-level randomness (the obstacle walk, one sandboxed call) uses a
//! [`SimRng`].  A sandboxed call gets a stream forked from the calling
//! agent's, so custom code stays reproducible per agent.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const PHI_64: u64 = 0x9e37_79b9_7f4a_7c15;

/// `gen_range` and `choose` for a newtype over `SmallRng`.
macro_rules! sampling {
    () => {
        /// Uniform value in `range`.
        #[inline]
        pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
            self.0.gen_range(range)
        }

        /// Uniform pick from `slice`; `None` when it is empty.
        #[inline]
        pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
            slice.choose(&mut self.0)
        }
    };
}

/// One agent's stream.  Decision logic receives it by `&mut`, never another
/// agent's.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let mixed = u64::from(agent).wrapping_mul(PHI_64);
        AgentRng(SmallRng::seed_from_u64(run_seed ^ mixed))
    }

    /// A fresh stream seeded from the next draw of this one.
    pub fn fork(&mut self) -> SimRng {
        SimRng::new(self.0.r#gen())
    }

    sampling!();
}

/// Stream for work that belongs to no single agent.  Only touched inside the
/// sequential part of a tick.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p`, clamped into [0, 1].
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    sampling!();
}
