// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Shared vocabulary for the two versioned-artifact kinds a Story owns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two artifact namespaces a row or outcome belongs to.
///
/// Title and Content share an identical shape and invariants but
/// live in distinct tables with distinct version sequences per Story;
/// this enum is how the Dispatcher and Processor outcomes name which one
/// they mean without duplicating the Title/Content structs into a single
/// generic type the repositories would have to downcast out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    Title,
    Content,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Title => write!(f, "Title"),
            ArtifactKind::Content => write!(f, "Content"),
        }
    }
}

/// A reference to "the Artifact" when the kind is known but the caller
/// only needs to talk about id + kind, e.g. a Review's `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub id: i64,
}
