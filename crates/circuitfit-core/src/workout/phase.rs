use serde::{Deserialize, Serialize};

/// Coarse stage of a workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Warmup,
    Circuit,
    Cooldown,
    Done,
}

impl Phase {
    /// The phase that follows this one. `Done` is terminal.
    pub fn next(self) -> Phase {
        match self {
            Phase::Start => Phase::Warmup,
            Phase::Warmup => Phase::Circuit,
            Phase::Circuit => Phase::Cooldown,
            Phase::Cooldown | Phase::Done => Phase::Done,
        }
    }

    /// Whether exercises are timed in this phase.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Warmup | Phase::Circuit | Phase::Cooldown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Warmup => "warmup",
            Phase::Circuit => "circuit",
            Phase::Cooldown => "cooldown",
            Phase::Done => "done",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
