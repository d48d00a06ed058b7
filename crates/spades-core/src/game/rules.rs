use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TARGET_SCORE: i32 = 200;

/// Rule switches fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub target_score: i32,
    pub allow_nil: bool,
    /// Accepted for compatibility; blind nil has no behaviour of its own and
    /// scores exactly like nil.
    pub allow_blind_nil: bool,
}

impl GameRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.target_score <= 0 {
            return Err(RulesError::NonPositiveTarget(self.target_score));
        }
        Ok(())
    }

    pub const fn min_bid(&self) -> u8 {
        if self.allow_nil { 0 } else { 1 }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            allow_nil: false,
            allow_blind_nil: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    NonPositiveTarget(i32),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::NonPositiveTarget(value) => {
                write!(f, "target score must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for RulesError {}
