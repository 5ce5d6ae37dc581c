// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Artifact version value object. Titles and Contents are append-only and
//! versioned per Story starting at 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative version number for a Title or Content row.
///
/// Version numbering starts at 0 and increases by 1 per new version for
/// the same Story. The type itself does not enforce contiguity across a
/// Story's full version history — that invariant spans multiple rows and
/// is checked by the repository layer and by property tests — but it
/// does rule out negative versions at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactVersion(i32);

impl ArtifactVersion {
    pub const INITIAL: ArtifactVersion = ArtifactVersion(0);

    pub const fn new(value: i32) -> Self {
        Self(value.max(0))
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// The version immediately following this one.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for ArtifactVersion {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ArtifactVersion {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<ArtifactVersion> for i32 {
    fn from(version: ArtifactVersion) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_version_is_zero() {
        assert_eq!(ArtifactVersion::INITIAL.value(), 0);
    }

    #[test]
    fn next_increases_by_one() {
        assert_eq!(ArtifactVersion::INITIAL.next().value(), 1);
    }
}
