// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Stage name value object: an opaque dotted string such as
//! `Title.From.Idea` or `Review.Script.Grammar`.
//!
//! The core accepts any string as a stage name; the State Catalog is what
//! classifies known vs. unknown. This type therefore does no validation
//! of its own beyond non-emptiness —
//! it exists to give stage names a distinct type from arbitrary
//! `String`s passed around the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageName(String);

impl StageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dotted segments of the stage name, e.g. `Review.Script.Grammar`
    /// splits into `["Review", "Script", "Grammar"]`. Used by the work
    /// selector's module-kind classification.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StageName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StageName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for StageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
