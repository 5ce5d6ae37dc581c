// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Work Selector — pure selection policy (C4)
//!
//! The deterministic ordering the Work Selector applies is expressed here
//! as pure functions over an already-fetched candidate set, so it can be
//! unit-tested without a database: `storyflow`'s infrastructure layer
//! runs one bounded query to build a [`SelectionCandidate`] per Story in
//! the stage, then hands the slice to [`select`].

use crate::services::StageKind;
use crate::value_objects::StoryId;
use chrono::{DateTime, Utc};

/// Everything the selection policy needs about one candidate Story,
/// already aggregated by the infrastructure query (max artifact versions,
/// and the scores of the Reviews attached to each artifact's *latest*
/// version).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCandidate {
    pub story_id: StoryId,
    pub created_at: DateTime<Utc>,
    /// `max(Title.version)` for this Story, or `None` if it has no Titles.
    pub max_title_version: Option<i32>,
    /// `max(Content.version)` for this Story, or `None` if it has no Contents.
    pub max_content_version: Option<i32>,
    /// Score of the Review referenced by the Story's latest Title, if any.
    pub latest_title_review_score: Option<i64>,
    /// Score of the Review referenced by the Story's latest Content, if any.
    pub latest_content_review_score: Option<i64>,
}

/// The work-version bucket for a candidate under a given stage kind.
/// Missing artifacts contribute version 0.
pub fn work_version_bucket(candidate: &SelectionCandidate, kind: StageKind) -> i32 {
    match kind {
        StageKind::Script => candidate.max_content_version.unwrap_or(0),
        StageKind::Title => candidate.max_title_version.unwrap_or(0),
        StageKind::Story => {
            candidate
                .max_title_version
                .unwrap_or(0)
                .max(candidate.max_content_version.unwrap_or(0))
        }
    }
}

/// The arithmetic mean of the latest-Content-review score and the
/// latest-Title-review score, with 0 for each missing review.
/// Deliberately favors Stories carrying both reviews.
pub fn story_score(candidate: &SelectionCandidate) -> f64 {
    let content_score = candidate.latest_content_review_score.unwrap_or(0) as f64;
    let title_score = candidate.latest_title_review_score.unwrap_or(0) as f64;
    (content_score + title_score) / 2.0
}

/// Apply the full five-step precedence order and return the winning
/// candidate, or `None` if the slice is empty. The stage filter itself
/// (step 1) is assumed already applied by the caller — every element of
/// `candidates` is presumed to share `state == stage`.
pub fn select(candidates: &[SelectionCandidate], kind: StageKind) -> Option<&SelectionCandidate> {
    candidates
        .iter()
        .min_by(|a, b| {
            let bucket_a = work_version_bucket(a, kind);
            let bucket_b = work_version_bucket(b, kind);
            bucket_a
                .cmp(&bucket_b)
                // higher story score wins -> reverse ordering for min_by
                .then_with(|| story_score(b).partial_cmp(&story_score(a)).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.story_id.value().cmp(&b.story_id.value()))
        })
}
