// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # State Catalog (C1)
//!
//! The single source of truth for stage names and the transition graph.
//! The graph is a DAG except for explicit review-refinement loops, where
//! a refinement stage's successor set reintroduces an earlier review
//! stage. The Catalog is a data structure, not a type lattice or
//! enum-per-stage hierarchy — loops are expressed by successor sets,
//! never by inheritance.
//!
//! The Catalog does not enforce DAG-ness and does not itself decide pass
//! vs. fail targets, thresholds, or static "next stage" for generation
//! stages — that per-stage operational data lives in the
//! [`super::StageManifest`] registry. The Catalog answers one question
//! only: "is `to` a legal successor of `from`?"

use std::collections::{BTreeMap, BTreeSet};

/// Enumerates all known stages and their permitted successor sets.
///
/// New stages are added by extending the map built in [`StateCatalog::new`]
/// — no other component enumerates stage names.
#[derive(Debug, Clone)]
pub struct StateCatalog {
    successors: BTreeMap<String, BTreeSet<String>>,
    initial: BTreeSet<String>,
}

impl StateCatalog {
    /// Build a catalog from an explicit adjacency map and initial-stage
    /// set. Used directly by tests that want a small, hand-built graph
    /// instead of the production workflow.
    pub fn from_graph<I, S, J>(edges: I, initial: J) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
        J: IntoIterator<Item = S>,
    {
        let mut successors = BTreeMap::new();
        for (from, tos) in edges {
            successors
                .entry(from.into())
                .or_insert_with(BTreeSet::new)
                .extend(tos.into_iter().map(Into::into));
        }
        // Ensure every successor that is itself unmentioned as a `from`
        // is still a known stage (e.g. the terminal stage).
        let all_tos: Vec<String> = successors.values().flatten().cloned().collect();
        for to in all_tos {
            successors.entry(to).or_insert_with(BTreeSet::new);
        }
        Self {
            successors,
            initial: initial.into_iter().map(Into::into).collect(),
        }
    }

    /// The production story-pipeline graph: a title is generated from an
    /// idea, a script is generated from the title, the script and the
    /// title are each reviewed (with refinement loops on failure), an
    /// expert review decides accept-vs-polish, and polish loops back into
    /// script review before the Story reaches the terminal `Publishing`
    /// stage.
    pub fn new() -> Self {
        Self::from_graph(
            [
                ("Title.From.Idea", vec!["Script.From.Idea.Title"]),
                ("Script.From.Idea.Title", vec!["Review.Script.Grammar"]),
                ("Review.Script.Grammar", vec!["Review.Script.Tone", "Script.Refine.Grammar"]),
                ("Script.Refine.Grammar", vec!["Review.Script.Grammar"]),
                ("Review.Script.Tone", vec!["Review.Title.Clarity", "Script.Refine.Tone"]),
                ("Script.Refine.Tone", vec!["Review.Script.Tone"]),
                ("Review.Title.Clarity", vec!["Story.ExpertReview", "Title.Refine.Clarity"]),
                ("Title.Refine.Clarity", vec!["Review.Title.Clarity"]),
                ("Story.ExpertReview", vec!["Publishing", "Story.Polish"]),
                ("Story.Polish", vec!["Review.Script.Tone"]),
                ("Publishing", vec![]),
            ],
            ["Title.From.Idea"],
        )
    }

    /// All stage names the catalog knows about.
    pub fn known_states(&self) -> impl Iterator<Item = &str> {
        self.successors.keys().map(String::as_str)
    }

    pub fn is_known(&self, stage: &str) -> bool {
        self.successors.contains_key(stage)
    }

    /// The designated initial stage(s) new Stories are created in.
    pub fn initial_stages(&self) -> impl Iterator<Item = &str> {
        self.initial.iter().map(String::as_str)
    }

    /// The stored successor set for `stage` — empty for unknown or
    /// terminal stages.
    pub fn next_states(&self, stage: &str) -> Vec<String> {
        self.successors.get(stage).map(|s| s.iter().cloned().collect()).unwrap_or_default()
    }

    /// Stages with an empty successor set, e.g. `Publishing`.
    pub fn terminal_stages(&self) -> impl Iterator<Item = &str> {
        self.successors
            .iter()
            .filter(|(_, tos)| tos.is_empty())
            .map(|(name, _)| name.as_str())
    }

    pub fn is_terminal(&self, stage: &str) -> bool {
        self.successors.get(stage).map(|tos| tos.is_empty()).unwrap_or(false)
    }
}

impl Default for StateCatalog {
    fn default() -> Self {
        Self::new()
    }
}
