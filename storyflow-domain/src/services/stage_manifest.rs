// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Manifest
//!
//! Per-stage operational data that is neither part of the State
//! Catalog's adjacency-only successor sets nor part of user-facing
//! `EngineConfig`: the module kind used for work-selection bucketing,
//! and — for generation, review, and decision stages — the static or
//! threshold-gated "next stage" the Dispatcher computes once a
//! Processor's outcome comes back.
//!
//! Pass-threshold defaults differ across stages (70/75/80/85); per-stage
//! threshold overrides are stage-manifest data rather than hardcoded
//! constants — see [`StageRole::Review::pass_threshold`].

use crate::value_objects::StageName;
use std::collections::HashMap;

/// The module kind a stage belongs to, used only to pick the work-version
/// formula in the Work Selector. An unrecognized stage
/// name classifies the same as `Story` ("unknown kind: same as
/// `Story.*`").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Script,
    Title,
    Story,
}

impl StageKind {
    /// Classify a stage name by its leading dotted segment(s):
    /// `Script`/`Review.Script.*` → `Script`, `Title`/`Review.Title.*` →
    /// `Title`, `Story.*` → `Story`, anything else → `Story` as well.
    pub fn classify(stage: &str) -> StageKind {
        let mut segments = stage.split('.');
        let first = segments.next().unwrap_or("");
        match first {
            "Script" => StageKind::Script,
            "Title" => StageKind::Title,
            "Story" => StageKind::Story,
            "Review" => match segments.next() {
                Some("Script") => StageKind::Script,
                Some("Title") => StageKind::Title,
                _ => StageKind::Story,
            },
            _ => StageKind::Story,
        }
    }
}

/// What kind of role a stage plays in the Dispatcher's "compute the next
/// stage" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageRole {
    /// A generation stage: the next stage is declared statically.
    Generation { next: StageName },
    /// A review stage: applies the threshold rule. `pass_threshold`
    /// overrides the configured default when present; `grammar_like`
    /// additionally refuses to pass on any CRITICAL-severity finding
    /// regardless of score.
    Review {
        pass: StageName,
        fail: StageName,
        pass_threshold: Option<i64>,
        grammar_like: bool,
    },
    /// A decision stage: the Processor returns the next stage directly.
    Decision,
    /// A terminal stage: dispatching it always yields `NoWork`.
    Terminal,
}

/// Static, per-stage configuration distinct from the Catalog's adjacency
/// data and distinct from runtime `EngineConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageManifest {
    pub kind: StageKind,
    pub role: StageRole,
}

/// The full set of stage manifests, keyed by stage name.
#[derive(Debug, Clone, Default)]
pub struct StageManifestRegistry {
    manifests: HashMap<String, StageManifest>,
}

impl StageManifestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stage: impl Into<String>, manifest: StageManifest) -> &mut Self {
        self.manifests.insert(stage.into(), manifest);
        self
    }

    pub fn get(&self, stage: &str) -> Option<&StageManifest> {
        self.manifests.get(stage)
    }

    /// The production manifest set, matching the graph in
    /// [`super::StateCatalog::new`] one-for-one: every non-terminal stage
    /// in the catalog must have an entry here, and every `Generation`/
    /// `Decision` target and `Review` pass/fail target must itself be a
    /// catalog-known stage (checked by a dedicated unit test below and by
    /// `storyflow`'s startup wiring, which refuses to start with a
    /// manifest/catalog mismatch: unknown stages are a configuration
    /// error caught before any Story is touched).
    pub fn production() -> Self {
        let mut registry = Self::new();
        registry
            .insert(
                "Title.From.Idea",
                StageManifest {
                    kind: StageKind::Title,
                    role: StageRole::Generation { next: StageName::new("Script.From.Idea.Title") },
                },
            )
            .insert(
                "Script.From.Idea.Title",
                StageManifest {
                    kind: StageKind::Script,
                    role: StageRole::Generation { next: StageName::new("Review.Script.Grammar") },
                },
            )
            .insert(
                "Review.Script.Grammar",
                StageManifest {
                    kind: StageKind::Script,
                    role: StageRole::Review {
                        pass: StageName::new("Review.Script.Tone"),
                        fail: StageName::new("Script.Refine.Grammar"),
                        pass_threshold: Some(80),
                        grammar_like: true,
                    },
                },
            )
            .insert(
                "Script.Refine.Grammar",
                StageManifest {
                    kind: StageKind::Script,
                    role: StageRole::Generation { next: StageName::new("Review.Script.Grammar") },
                },
            )
            .insert(
                "Review.Script.Tone",
                StageManifest {
                    kind: StageKind::Script,
                    role: StageRole::Review {
                        pass: StageName::new("Review.Title.Clarity"),
                        fail: StageName::new("Script.Refine.Tone"),
                        pass_threshold: None,
                        grammar_like: false,
                    },
                },
            )
            .insert(
                "Script.Refine.Tone",
                StageManifest {
                    kind: StageKind::Script,
                    role: StageRole::Generation { next: StageName::new("Review.Script.Tone") },
                },
            )
            .insert(
                "Review.Title.Clarity",
                StageManifest {
                    kind: StageKind::Title,
                    role: StageRole::Review {
                        pass: StageName::new("Story.ExpertReview"),
                        fail: StageName::new("Title.Refine.Clarity"),
                        pass_threshold: Some(70),
                        grammar_like: false,
                    },
                },
            )
            .insert(
                "Title.Refine.Clarity",
                StageManifest {
                    kind: StageKind::Title,
                    role: StageRole::Generation { next: StageName::new("Review.Title.Clarity") },
                },
            )
            .insert(
                "Story.ExpertReview",
                StageManifest {
                    kind: StageKind::Story,
                    role: StageRole::Decision,
                },
            )
            .insert(
                "Story.Polish",
                StageManifest {
                    kind: StageKind::Story,
                    role: StageRole::Generation { next: StageName::new("Review.Script.Tone") },
                },
            )
            .insert(
                "Publishing",
                StageManifest {
                    kind: StageKind::Story,
                    role: StageRole::Terminal,
                },
            );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StateCatalog;

    #[test]
    fn classify_matches_spec_examples() {
        assert_eq!(StageKind::classify("Script.From.Idea.Title"), StageKind::Script);
        assert_eq!(StageKind::classify("Review.Script.Grammar"), StageKind::Script);
        assert_eq!(StageKind::classify("Title.From.Idea"), StageKind::Title);
        assert_eq!(StageKind::classify("Review.Title.Clarity"), StageKind::Title);
        assert_eq!(StageKind::classify("Story.ExpertReview"), StageKind::Story);
        assert_eq!(StageKind::classify("Some.Unknown.Thing"), StageKind::Story);
    }

    #[test]
    fn production_manifest_covers_every_non_terminal_catalog_stage() {
        let catalog = StateCatalog::new();
        let manifests = StageManifestRegistry::production();
        for stage in catalog.known_states() {
            assert!(manifests.get(stage).is_some(), "missing manifest for {stage}");
        }
    }

    #[test]
    fn review_targets_are_known_catalog_stages() {
        let catalog = StateCatalog::new();
        let manifests = StageManifestRegistry::production();
        for stage in catalog.known_states() {
            match &manifests.get(stage).unwrap().role {
                StageRole::Generation { next } => assert!(catalog.is_known(next.as_str())),
                StageRole::Review { pass, fail, .. } => {
                    assert!(catalog.is_known(pass.as_str()));
                    assert!(catalog.is_known(fail.as_str()));
                }
                StageRole::Decision | StageRole::Terminal => {}
            }
        }
    }
}
