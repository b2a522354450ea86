use std::fmt::{Display, Formatter};
use std::str::FromStr;

use snafu::Snafu;

/// How a relaxable goal enters the formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Policy {
    Hard,
    /// Cost per violated clause. Zero weight is treated as hard.
    Soft(u64),
}

impl Policy {
    pub fn is_hard(self) -> bool {
        matches!(self, Policy::Hard | Policy::Soft(0))
    }

    /// Same policy with the weight multiplied by `factor`.
    pub fn scaled(self, factor: u64) -> Policy {
        match self {
            Policy::Hard => Policy::Hard,
            Policy::Soft(w) => Policy::Soft(w.saturating_mul(factor)),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Hard => write!(f, "hard"),
            Policy::Soft(w) => write!(f, "soft({})", w),
        }
    }
}

/// Weights of the soft goals.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Weights {
    pub isolation: u64,
    pub working_days: u64,
    pub stability: u64,
    /// Per student above the room capacity.
    pub capacity: u64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            isolation: 2,
            working_days: 5,
            stability: 1,
            capacity: 1,
        }
    }
}

/// Policy of every relaxable goal plus the room model in use.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Policies {
    pub isolation: Policy,
    pub working_days: Policy,
    pub stability: Policy,
    pub capacity: Policy,
    /// Whether `CHR(c,h,r)` variables are allocated.
    pub room_slots: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Mode {
    /// Everything hard.
    Strict,
    /// Lecture isolation soft.
    Isolation,
    /// Isolation and minimum working days soft.
    WorkingDays,
    /// All four goals soft, room-slot model.
    #[default]
    Complete,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Strict, Mode::Isolation, Mode::WorkingDays, Mode::Complete];

    pub fn key(self) -> &'static str {
        match self {
            Mode::Strict => "strict",
            Mode::Isolation => "isolation",
            Mode::WorkingDays => "working-days",
            Mode::Complete => "complete",
        }
    }

    /// Numeric alias accepted on the command line.
    pub fn section(self) -> &'static str {
        match self {
            Mode::Strict => "3",
            Mode::Isolation => "4.1",
            Mode::WorkingDays => "4.2",
            Mode::Complete => "4.4",
        }
    }

    pub fn policies(self, weights: &Weights) -> Policies {
        use Policy::*;
        match self {
            Mode::Strict => Policies {
                isolation: Hard,
                working_days: Hard,
                stability: Hard,
                capacity: Hard,
                room_slots: false,
            },
            Mode::Isolation => Policies {
                isolation: Soft(weights.isolation),
                working_days: Hard,
                stability: Hard,
                capacity: Hard,
                room_slots: false,
            },
            Mode::WorkingDays => Policies {
                isolation: Soft(weights.isolation),
                working_days: Soft(weights.working_days),
                stability: Hard,
                capacity: Hard,
                room_slots: false,
            },
            Mode::Complete => Policies {
                isolation: Soft(weights.isolation),
                working_days: Soft(weights.working_days),
                stability: Soft(weights.stability),
                capacity: Soft(weights.capacity),
                room_slots: true,
            },
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseModeError {
    #[snafu(display(
        "Unknown encoding mode '{}', expected one of: strict (3), isolation (4.1), working-days (4.2), complete (4.4)",
        key
    ))]
    UnknownMode { key: String },
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| s == mode.key() || s == mode.section())
            .ok_or_else(|| ParseModeError::UnknownMode { key: s.to_string() })
    }
}
