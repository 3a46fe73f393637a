//! Delete confirmation state machine.
//!
//! `Closed → Counting(n) → … → Counting(1) → Enabled → Closed`.
//! Items with [`DeletePolicy::Immediate`] skip the counting states.
//! Cancel is valid from any open state; confirm only from `Enabled`.

use crate::errors::AppError;
use crate::models::listing::DeletePolicy;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Closed,
    Counting {
        target: String,
        remaining: u32,
    },
    Enabled {
        target: String,
    },
}

impl DeleteConfirmation {
    /// Open for `target`, replacing any previous target and restarting the countdown.
    pub fn open(&mut self, policy: DeletePolicy, target: impl Into<String>) {
        let target = target.into();
        *self = match policy {
            DeletePolicy::Countdown(secs) if secs > 0 => Self::Counting {
                target,
                remaining: secs,
            },
            _ => Self::Enabled { target },
        };
    }

    /// One countdown step. Returns `true` when this tick enabled the confirm action.
    ///
    /// Ticks outside the counting state are ignored.
    pub fn tick(&mut self) -> bool {
        let Self::Counting { target, remaining } = self else {
            return false;
        };

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            *self = Self::Enabled {
                target: std::mem::take(target),
            };
            return true;
        }
        false
    }

    /// Close without any backend effect, returning the discarded target.
    pub fn cancel(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Closed => None,
            Self::Counting { target, .. } | Self::Enabled { target } => Some(target),
        }
    }

    /// Target to delete, only when the confirm action is enabled.
    pub fn confirmable_target(&self) -> Result<&str, AppError> {
        match self {
            Self::Enabled { target } => Ok(target),
            Self::Counting { remaining, .. } => Err(AppError::InvalidState(format!(
                "Delete confirmation is disabled for {remaining} more second(s)"
            ))),
            Self::Closed => Err(AppError::InvalidState(
                "No delete confirmation is open".to_string(),
            )),
        }
    }

    /// Close after a successful delete.
    pub fn complete(&mut self) {
        *self = Self::Closed;
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Counting { target, .. } | Self::Enabled { target } => Some(target),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_counting(&self) -> bool {
        matches!(self, Self::Counting { .. })
    }

    pub fn can_confirm(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    /// Seconds left before confirm is enabled; zero when enabled or closed.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Counting { remaining, .. } => *remaining,
            _ => 0,
        }
    }
}
