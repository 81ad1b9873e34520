//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are handed out by a monotonically increasing counter owned by the
//! world, so they are stable for the lifetime of an entity and never reused
//! until the world is reset.  Unlike SoA indices they do not double as
//! `Vec` positions: removing an entity leaves a gap in the sequence.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$label` is the human-facing prefix used by `Display` (`agent_3`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The first id a fresh counter hands out.
            pub const FIRST: $name = $name(1);

            /// The id following `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0.wrapping_add(1))
            }

            /// Label prefix used when rendering this id for humans.
            pub const fn label() -> &'static str {
                $label
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::FIRST
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $label, self.0)
            }
        }

        impl From<$name> for u64 {
            #[inline(always)]
            fn from(id: $name) -> u64 {
                id.0 as u64
            }
        }
    };
}

typed_id! {
    /// Stable identity of an agent.  Max ~4.3 billion allocations per reset.
    pub struct AgentId(u32) = "agent";
}

typed_id! {
    /// Stable identity of a food item.
    pub struct FoodId(u32) = "food";
}

typed_id! {
    /// Stable identity of an obstacle.
    pub struct ObstacleId(u32) = "obstacle";
}
