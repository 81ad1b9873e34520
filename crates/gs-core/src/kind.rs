//! Closed enums for the tags clients send as strings.
//!
//! Each enum has a strict serde representation (snake_case) for persisted
//! snapshots and a lenient [`parse_lenient`](BehaviorKind::parse_lenient)
//! used on command input, where unknown labels fall back to a safe default
//! instead of rejecting the whole command.

// ── BehaviorKind ──────────────────────────────────────────────────────────────

/// Which decision strategy drives an agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BehaviorKind {
    /// Greedy, memoryless forager.
    #[default]
    Reactive,
    /// Prefers cells it has not visited yet.
    Explorer,
    /// Paths to the nearest visible food with its configured search.
    Collector,
    /// Like `Collector`, but claims its target so peers pick another one.
    Cooperative,
    /// Races rivals for the food it can reach first.
    Competitive,
    /// Reserved for a learning policy; currently behaves like `Reactive`.
    QLearning,
    /// Runs user-supplied code in the sandbox.
    Custom,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 7] = [
        BehaviorKind::Reactive,
        BehaviorKind::Explorer,
        BehaviorKind::Collector,
        BehaviorKind::Cooperative,
        BehaviorKind::Competitive,
        BehaviorKind::QLearning,
        BehaviorKind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Reactive    => "reactive",
            BehaviorKind::Explorer    => "explorer",
            BehaviorKind::Collector   => "collector",
            BehaviorKind::Cooperative => "cooperative",
            BehaviorKind::Competitive => "competitive",
            BehaviorKind::QLearning   => "q_learning",
            BehaviorKind::Custom      => "custom",
        }
    }

    /// Parse a client label.  `goal_based` is accepted as an older name for
    /// `collector`; anything unrecognised is `Reactive`.
    pub fn parse_lenient(label: &str) -> BehaviorKind {
        match label.trim().to_ascii_lowercase().as_str() {
            "explorer"                        => BehaviorKind::Explorer,
            "collector" | "goal_based"        => BehaviorKind::Collector,
            "cooperative"                     => BehaviorKind::Cooperative,
            "competitive"                     => BehaviorKind::Competitive,
            "q_learning" | "qlearning"        => BehaviorKind::QLearning,
            "custom"                          => BehaviorKind::Custom,
            _                                 => BehaviorKind::Reactive,
        }
    }

    /// Default display colour for newly placed agents of this kind.
    pub fn default_color(self) -> &'static str {
        match self {
            BehaviorKind::Reactive    => "#22d3ee",
            BehaviorKind::Explorer    => "#a78bfa",
            BehaviorKind::Collector   => "#34d399",
            BehaviorKind::Cooperative => "#60a5fa",
            BehaviorKind::Competitive => "#f87171",
            BehaviorKind::QLearning   => "#fbbf24",
            BehaviorKind::Custom      => "#f472b6",
        }
    }
}

impl std::fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SearchStrategy ────────────────────────────────────────────────────────────

/// Which pathfinding algorithm a planning agent uses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchStrategy {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl SearchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Bfs      => "bfs",
            SearchStrategy::Dfs      => "dfs",
            SearchStrategy::Dijkstra => "dijkstra",
            SearchStrategy::AStar    => "a_star",
        }
    }

    /// Parse a client label.  Unknown labels fall back to `Bfs`.
    pub fn parse_lenient(label: &str) -> SearchStrategy {
        match label.trim().to_ascii_lowercase().as_str() {
            "dfs"                        => SearchStrategy::Dfs,
            "dijkstra"                   => SearchStrategy::Dijkstra,
            "a_star" | "astar" | "a*"    => SearchStrategy::AStar,
            _                            => SearchStrategy::Bfs,
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Mobility ──────────────────────────────────────────────────────────────────

/// Whether an obstacle stays put or wanders.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mobility {
    #[default]
    Static,
    /// Takes one random orthogonal step into a free cell every tick.
    Dynamic,
}

impl Mobility {
    pub fn as_str(self) -> &'static str {
        match self {
            Mobility::Static  => "static",
            Mobility::Dynamic => "dynamic",
        }
    }

    /// Parse a client label.  Unknown labels fall back to `Static`.
    pub fn parse_lenient(label: &str) -> Mobility {
        if label.trim().eq_ignore_ascii_case("dynamic") {
            Mobility::Dynamic
        } else {
            Mobility::Static
        }
    }
}

impl std::fmt::Display for Mobility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
