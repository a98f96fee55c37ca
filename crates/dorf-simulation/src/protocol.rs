//! Line-delimited JSON command protocol.
//!
//! Each request is one JSON object tagged by `cmd`; each response is one
//! JSON object with an `ok` flag. A bad line never stops the session, it
//! just produces an `ok: false` response.

use dorf_core::WorldState;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::event::DayLog;
use crate::shared::SharedSimulation;
use crate::simulation::TickSummary;

fn default_multiplier() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// A command sent to the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    /// Advance the world.
    Tick {
        /// Number of days to simulate.
        #[serde(default = "default_multiplier")]
        multiplier: i64,
    },
    /// Read the current world.
    State,
    /// Return to day 0.
    Reset,
    /// Read recent day logs.
    Logs {
        /// Maximum number of logs to return.
        #[serde(default = "default_limit")]
        limit: i64,
    },
}

impl Request {
    /// Whether this request changes the world.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Tick { .. } | Self::Reset)
    }
}

/// The reply to a [`Request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub ok: bool,
    /// Current day, for tick and reset replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u64>,
    /// Current stock, for tick and reset replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_stock: Option<i64>,
    /// The world, for state, tick, and reset replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<WorldState>,
    /// Day logs, for logs replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<DayLog>>,
    /// What went wrong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A failure reply carrying only a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// A tick reply: the summary fields plus the world right after the tick.
    pub fn ticked(summary: TickSummary, world: WorldState) -> Self {
        Self {
            ok: summary.ok,
            day: Some(summary.day),
            food_stock: Some(summary.food_stock),
            state: Some(world),
            error: summary.error,
            ..Self::default()
        }
    }

    fn installed(world: WorldState) -> Self {
        Self {
            ok: true,
            day: Some(world.day),
            food_stock: Some(world.food_stock),
            state: Some(world),
            ..Self::default()
        }
    }
}

/// Parse one request line.
///
/// The error string is ready to be sent back as a response.
pub fn parse_request(line: &str) -> Result<Request, String> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| format!("invalid json: {e}"))?;
    let cmd = match value.get("cmd") {
        Some(serde_json::Value::String(cmd)) => cmd.clone(),
        Some(_) => return Err("invalid request: `cmd` must be a string".to_string()),
        None => return Err("invalid request: missing `cmd`".to_string()),
    };
    if !matches!(cmd.as_str(), "tick" | "state" | "reset" | "logs") {
        return Err(format!("unknown command: {cmd}"));
    }
    serde_json::from_value(value).map_err(|e| format!("invalid request: {e}"))
}

/// Execute a request against a shared simulation.
pub fn handle(sim: &SharedSimulation, request: Request) -> Response {
    match request {
        Request::Tick { multiplier } => match sim.tick(multiplier) {
            Ok((summary, world)) => Response::ticked(summary, world),
            Err(e) => {
                warn!(multiplier, error = %e, "tick rejected");
                Response::error(e.to_string())
            }
        },
        Request::State => Response {
            ok: true,
            state: Some(sim.state()),
            ..Response::default()
        },
        Request::Reset => Response::installed(sim.reset()),
        Request::Logs { limit } => Response {
            ok: true,
            logs: Some(sim.logs(limit)),
            ..Response::default()
        },
    }
}

/// Parse and execute one line, always producing a response.
pub fn handle_line(sim: &SharedSimulation, line: &str) -> Response {
    match parse_request(line) {
        Ok(request) => handle(sim, request),
        Err(message) => Response::error(message),
    }
}
