// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Entity Identifier Value Objects
//!
//! Type-safe wrappers around the 64-bit integer surrogate keys the
//! Artifact Store assigns on insertion. Each wrapper exists purely to
//! prevent a `StoryId` from being passed where a
//! `ReviewId` is expected, at zero runtime cost.
//!
//! Unlike value objects elsewhere in this codebase that carry their own
//! temporal ordering (ULID-based identifiers), these are opaque
//! auto-increment keys: ordering and "freshness" of a row is carried by
//! its `created_at` timestamp, not by the id itself.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Construct from a raw store-assigned id.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw integer value, as assigned by the store.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(StoryId, "Identifies a Story row.");
entity_id!(TitleId, "Identifies a Title (versioned artifact) row.");
entity_id!(ContentId, "Identifies a Content (versioned artifact) row.");
entity_id!(ReviewId, "Identifies an immutable Review row.");
