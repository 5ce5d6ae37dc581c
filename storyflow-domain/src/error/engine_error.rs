// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A hierarchical error type for the workflow engine, mirroring the taxonomy
//! in the error-handling design: every store, transition, and dispatcher
//! failure is a distinct, named variant rather than a string-typed bag.
//!
//! ## Error categories
//!
//! - **Transient store errors** (`StoreTransient`) are retried by the driver
//!   with backoff; they are the only variant a caller should retry blindly.
//! - **Fatal store errors** (`StoreFatal`) and logic errors
//!   (`InvalidScore`, `VersionConflict`, `AlreadyReviewed`,
//!   `IllegalTransition`, `UnknownStage`, `MissingInput`) never self-heal and
//!   always abort the current step.
//! - **`AlreadyDone`** is a guard outcome, not a failure: callers should
//!   usually log it at most at `debug`/verbose level and move on.
//! - **`ProcessorFailed`** wraps a failure reported by the external
//!   Processor, carrying whether the driver should retry it.
//!
//! Every variant that names a Story, stage, or artifact carries that
//! identifier so the caller can log "stage name, story id, error kind" as
//! required of user-facing failures.

use thiserror::Error;

/// Domain-specific errors for the workflow engine.
///
/// Each variant is actionable on its own: logic errors are non-retryable,
/// `StoreTransient` is retryable with backoff, and `NoWork`/`AlreadyDone`
/// are not really errors so much as step outcomes that happen to travel
/// through the same `Result` channel as failures.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    /// Stage name that is not present in the State Catalog.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// `(from, to)` is not in `from`'s successor set.
    #[error("illegal transition from '{from}' to '{to}': {reason}")]
    IllegalTransition {
        from: String,
        to: String,
        reason: String,
    },

    /// Score outside the inclusive `0..=100` range.
    #[error("invalid score {score}: must be between 0 and 100")]
    InvalidScore { score: i64 },

    /// `(story_id, version)` already exists for this artifact kind.
    #[error("version conflict for story {story_id}: version {version} already exists")]
    VersionConflict { story_id: i64, version: i32 },

    /// `set_review_id` called with a review id that differs from the one
    /// already stored.
    #[error("artifact {artifact_id} already carries review {existing_review_id}, cannot set {attempted_review_id}")]
    AlreadyReviewed {
        artifact_id: i64,
        existing_review_id: i64,
        attempted_review_id: i64,
    },

    /// A required row (Story, artifact, Review) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The Processor's declared input needs could not be satisfied.
    #[error("missing input for stage '{stage}': {reason}")]
    MissingInput { stage: String, reason: String },

    /// The dispatcher's idempotency guard detected the step was already
    /// performed; not a failure, swallowed at all but verbose log levels.
    #[error("stage '{stage}' already done for story {story_id}")]
    AlreadyDone { stage: String, story_id: i64 },

    /// A store operation failed for a reason expected to be transient
    /// (lock wait timeout, I/O glitch). Retryable with backoff.
    #[error("transient store error: {0}")]
    StoreTransient(String),

    /// A store operation failed for a reason that will not resolve on
    /// retry (schema mismatch, disk full, corrupt database).
    #[error("fatal store error: {0}")]
    StoreFatal(String),

    /// The external Processor reported a failure.
    #[error("processor failed for stage '{stage}' (recoverable={recoverable}): {message}")]
    ProcessorFailed {
        stage: String,
        recoverable: bool,
        message: String,
    },

    /// Configuration is malformed or internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Catch-all for preconditions violated only by programmer error;
    /// should never surface from a correctly wired driver.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Whether the driver loop should retry this error with backoff.
    ///
    /// Only `StoreTransient` and a `ProcessorFailed` flagged recoverable
    /// are retryable; every other variant is a logic or fatal error per
    /// the error-handling design's "Local recovery" column.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::StoreTransient(_) | EngineError::ProcessorFailed { recoverable: true, .. }
        )
    }

    /// Whether this error should abort the driver entirely rather than
    /// move on to the next Story/stage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::StoreFatal(_))
    }
}
