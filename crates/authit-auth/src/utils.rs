use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{AuthitError, EPOCH_FORMAT};

/// Wall-clock time truncated to the minute, e.g. `2024-01-01 00:00`.
///
/// Used as the rolling nonce: both peers compute the same value without
/// tight clock synchronization as long as they agree on the current minute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Epoch(String);

impl Epoch {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self(time.format(EPOCH_FORMAT).to_string())
    }

    /// Parse an epoch string, rejecting anything that is not minute resolution.
    pub fn parse(epoch: &str) -> Result<Self, AuthitError> {
        NaiveDateTime::parse_from_str(epoch, EPOCH_FORMAT)
            .map_err(|_| AuthitError::InvalidEpoch(epoch.to_string()))?;
        Ok(Self(epoch.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the current epoch.
pub trait EpochClock {
    fn current_epoch(&self) -> Epoch;
}

/// The UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl EpochClock for SystemClock {
    fn current_epoch(&self) -> Epoch {
        Epoch::at(Utc::now())
    }
}

/// A clock pinned to one epoch.
#[derive(Debug, Clone)]
pub struct FixedClock(Epoch);

impl FixedClock {
    pub fn new(epoch: Epoch) -> Self {
        Self(epoch)
    }
}

impl EpochClock for FixedClock {
    fn current_epoch(&self) -> Epoch {
        self.0.clone()
    }
}

impl<C: EpochClock + ?Sized> EpochClock for &C {
    fn current_epoch(&self) -> Epoch {
        (**self).current_epoch()
    }
}
