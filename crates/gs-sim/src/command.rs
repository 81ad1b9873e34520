//! Client commands and the replies they produce.
//!
//! # Wire format
//!
//! ```json
//! {"type": "ADD_AGENT", "data": {"x": 0, "y": 1, "agent_type": "collector",
//!                                "strategy": "a_star", "config": {"initialEnergy": 80}}}
//! {"type": "STEP"}
//! ```
//!
//! Payload-free commands accept any (or no) `data`.  Per-entity `config`
//! objects and `UPDATE_CONFIG` bodies are read leniently: malformed fields
//! are skipped and reported back, the rest still apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gs_core::{AgentId, Cell};

use crate::{StopReason, WorldSnapshot};

fn default_extent() -> i32 {
    25
}

fn default_agent_type() -> String {
    "reactive".to_owned()
}

fn default_strategy() -> String {
    "bfs".to_owned()
}

fn default_food_type() -> String {
    "food".to_owned()
}

fn default_subtype() -> String {
    "static".to_owned()
}

// ── Payloads ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellArgs {
    pub x: i32,
    pub y: i32,
}

impl CellArgs {
    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedArgs {
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResizeArgs {
    #[serde(default = "default_extent")]
    pub width:  i32,
    #[serde(default = "default_extent")]
    pub height: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeArgs {
    #[serde(alias = "agentType")]
    pub agent_type: String,
    pub code:       String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddAgentArgs {
    pub x:          i32,
    pub y:          i32,
    #[serde(default = "default_agent_type", alias = "agentType")]
    pub agent_type: String,
    #[serde(default = "default_strategy")]
    pub strategy:   String,
    /// `color`, `initialEnergy`, `visionRadius`, `code`.
    #[serde(default)]
    pub config:     Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddFoodArgs {
    pub x:         i32,
    pub y:         i32,
    #[serde(default = "default_food_type", alias = "foodType")]
    pub food_type: String,
    /// `nutritionValue`.
    #[serde(default)]
    pub config:    Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddObstacleArgs {
    pub x:       i32,
    pub y:       i32,
    /// `static` or `dynamic`.
    #[serde(default = "default_subtype")]
    pub subtype: String,
    /// `isDestructible`, `destructionCost`.
    #[serde(default)]
    pub config:  Value,
}

/// One administrative move.  `id` is read leniently (`3`, `"3"`,
/// `"agent_3"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveArgs {
    pub id: Value,
    pub x:  i32,
    pub y:  i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchMoveArgs {
    #[serde(default)]
    pub moves: Vec<MoveArgs>,
}

// ── Command ───────────────────────────────────────────────────────────────────

/// Everything a client can ask of one world instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(try_from = "Envelope")]
pub enum Command {
    Start,
    Stop,
    Pause,
    Reset,
    Step,
    SetSpeed(SpeedArgs),
    ResizeGrid(ResizeArgs),
    UpdateConfig(Value),
    UpdateAgentCode(CodeArgs),
    AddAgent(AddAgentArgs),
    AddFood(AddFoodArgs),
    AddObstacle(AddObstacleArgs),
    RemoveElement(CellArgs),
    BatchMove(BatchMoveArgs),
    LoadState(Box<WorldSnapshot>),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start              => "START",
            Command::Stop               => "STOP",
            Command::Pause              => "PAUSE",
            Command::Reset              => "RESET",
            Command::Step               => "STEP",
            Command::SetSpeed(_)        => "SET_SPEED",
            Command::ResizeGrid(_)      => "RESIZE_GRID",
            Command::UpdateConfig(_)    => "UPDATE_CONFIG",
            Command::UpdateAgentCode(_) => "UPDATE_AGENT_CODE",
            Command::AddAgent(_)        => "ADD_AGENT",
            Command::AddFood(_)         => "ADD_FOOD",
            Command::AddObstacle(_)     => "ADD_OBSTACLE",
            Command::RemoveElement(_)   => "REMOVE_ELEMENT",
            Command::BatchMove(_)       => "BATCH_MOVE",
            Command::LoadState(_)       => "LOAD_STATE",
        }
    }

    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }
}

/// Raw `{type, data}` pair, decoded into a [`Command`] by name.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

impl TryFrom<Envelope> for Command {
    type Error = String;

    fn try_from(env: Envelope) -> Result<Self, Self::Error> {
        fn payload<T: serde::de::DeserializeOwned>(kind: &str, data: Value) -> Result<T, String> {
            serde_json::from_value(data).map_err(|e| format!("{kind}: {e}"))
        }

        let data = env.data;
        let kind = env.kind.as_str();
        Ok(match kind {
            "START"             => Command::Start,
            "STOP"              => Command::Stop,
            "PAUSE"             => Command::Pause,
            "RESET"             => Command::Reset,
            "STEP"              => Command::Step,
            "SET_SPEED"         => Command::SetSpeed(payload(kind, data)?),
            "RESIZE_GRID"       => Command::ResizeGrid(payload(kind, data)?),
            "UPDATE_CONFIG"     => Command::UpdateConfig(data),
            "UPDATE_AGENT_CODE" => Command::UpdateAgentCode(payload(kind, data)?),
            "ADD_AGENT"         => Command::AddAgent(payload(kind, data)?),
            "ADD_FOOD"          => Command::AddFood(payload(kind, data)?),
            "ADD_OBSTACLE"      => Command::AddObstacle(payload(kind, data)?),
            "REMOVE_ELEMENT"    => Command::RemoveElement(payload(kind, data)?),
            "BATCH_MOVE"        => Command::BatchMove(payload(kind, data)?),
            "LOAD_STATE"        => Command::LoadState(Box::new(payload(kind, data)?)),
            other               => return Err(format!("unknown command type `{other}`")),
        })
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Why a command changed nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    Occupied { cell: Cell },
    OutOfBounds { cell: Cell },
    NothingAt { cell: Cell },
    InvalidDimensions { width: i32, height: i32 },
    CodeRejected { message: String },
    InvalidValue { key: String },
    Halted { stop: StopReason },
    InvalidState { message: String },
}

/// Result of one command, distinct for success, partial success and no-op.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    /// Applied, but these fields or items were skipped.
    Partial { skipped: Vec<String> },
    Rejected { rejection: Rejection },
}

impl CommandOutcome {
    pub fn rejected(rejection: Rejection) -> Self {
        CommandOutcome::Rejected { rejection }
    }

    /// `Applied` if nothing was skipped, otherwise `Partial`.
    pub fn from_skipped(skipped: Vec<String>) -> Self {
        if skipped.is_empty() {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Partial { skipped }
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CommandOutcome::Rejected { .. })
    }
}

/// Sent back after every command: the outcome plus the resulting state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReply {
    pub outcome: CommandOutcome,
    pub state:   WorldSnapshot,
}

/// The id a lenient `MoveArgs::id` names, if it parses.
pub(crate) fn move_target(m: &MoveArgs) -> Option<AgentId> {
    crate::lenient::as_agent_id(&m.id)
}
