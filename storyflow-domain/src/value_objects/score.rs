// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Review score value object, bounded to `0..=100` at construction.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Review's score, validated to the inclusive range `0..=100`.
///
/// Construction is the only place this invariant is checked; once built,
/// a `Score` is guaranteed valid for the lifetime of the value: scores are
/// bounded to `0..=100` at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i64);

impl Score {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    /// Validate and construct a `Score`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidScore` for any value outside
    /// `0..=100` (boundary behavior: 0 and 100 accepted, -1 and 101
    /// rejected).
    pub fn new(value: i64) -> Result<Self, EngineError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EngineError::InvalidScore { score: value })
        }
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Score {
    type Error = EngineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
