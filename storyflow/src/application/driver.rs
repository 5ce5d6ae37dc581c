// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The worker/driver loop (`spec.md` §5 "Scheduling model").
//!
//! A pull loop, not a generator or coroutine (`spec.md` §9: "the driver is
//! a pull loop with blocking store I/O and explicit cancellation
//! tokens"): one worker per enabled stage, each repeatedly calling
//! `StageDispatcher::step`, sleeping on `NoWork`, and retrying transient
//! store errors with exponential backoff and jitter up to a configured
//! budget.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use storyflow_bootstrap::shutdown::CancellationToken;
use storyflow_domain::error::EngineError;

use crate::infrastructure::metrics::EngineMetrics;

use super::dispatcher::{DispatchOutcome, StageDispatcher};

/// The subset of `EngineConfig` the driver loop itself consults.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub worker_poll_interval_ms: u64,
    pub retry_max_attempts: u32,
    pub retry_base_backoff_ms: u64,
}

pub struct Driver {
    dispatcher: Arc<StageDispatcher>,
    metrics: Arc<EngineMetrics>,
    config: DriverConfig,
}

impl Driver {
    pub fn new(dispatcher: Arc<StageDispatcher>, metrics: Arc<EngineMetrics>, config: DriverConfig) -> Self {
        Self { dispatcher, metrics, config }
    }

    /// Process exactly one step for `stage` and return its outcome,
    /// retrying transient store errors up to `retry_max_attempts` with
    /// exponential backoff and jitter (`spec.md` §4.5 "Retry and
    /// recovery"). Used by one-shot mode and by each daemon worker's
    /// inner loop.
    pub async fn step_with_retry(&self, stage: &str) -> Result<DispatchOutcome, EngineError> {
        let mut attempt: u32 = 0;
        loop {
            match self.dispatcher.step(stage).await {
                Ok(outcome) => {
                    match &outcome {
                        DispatchOutcome::Advanced { to, .. } => self.metrics.record_advanced(to),
                        DispatchOutcome::NoWork => self.metrics.record_no_work(stage),
                        DispatchOutcome::AlreadyDone { .. } => {}
                    }
                    return Ok(outcome);
                }
                Err(e) if e.is_retryable() && attempt < self.config.retry_max_attempts => {
                    self.metrics.record_failed(stage, "retrying");
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    self.metrics.record_failed(stage, error_kind(&e));
                    return Err(e);
                }
            }
        }
    }

    /// Exponential backoff with full jitter: `base * 2^attempt`, capped
    /// at 30s, then a uniform random delay up to that cap.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let capped_exponent = attempt.min(16);
        let base = self.config.retry_base_backoff_ms.saturating_mul(1u64 << capped_exponent);
        let capped = base.min(30_000);
        let jittered = rand::rng().random_range(0..=capped.max(1));
        Duration::from_millis(jittered)
    }

    /// Run one worker loop bound to `stage` until `token` is cancelled.
    /// Daemon mode: continuous polling with the configured poll interval
    /// on `NoWork`, exits cleanly (no error) on cancellation between
    /// steps (`spec.md` §5 "Cancellation semantics").
    pub async fn run_worker(&self, stage: &str, token: CancellationToken) -> Result<(), EngineError> {
        loop {
            if token.is_cancelled() {
                return Ok(());
            }

            tokio::select! {
                _ = token.cancelled() => return Ok(()),
                result = self.step_with_retry(stage) => {
                    match result? {
                        DispatchOutcome::Advanced { .. } | DispatchOutcome::AlreadyDone { .. } => continue,
                        DispatchOutcome::NoWork => {
                            tokio::select! {
                                _ = token.cancelled() => return Ok(()),
                                _ = tokio::time::sleep(Duration::from_millis(self.config.worker_poll_interval_ms)) => {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn error_kind(e: &EngineError) -> &'static str {
    match e {
        EngineError::UnknownStage(_) => "unknown_stage",
        EngineError::IllegalTransition { .. } => "illegal_transition",
        EngineError::InvalidScore { .. } => "invalid_score",
        EngineError::VersionConflict { .. } => "version_conflict",
        EngineError::AlreadyReviewed { .. } => "already_reviewed",
        EngineError::NotFound(_) => "not_found",
        EngineError::MissingInput { .. } => "missing_input",
        EngineError::AlreadyDone { .. } => "already_done",
        EngineError::StoreTransient(_) => "store_transient",
        EngineError::StoreFatal(_) => "store_fatal",
        EngineError::ProcessorFailed { .. } => "processor_failed",
        EngineError::InvalidConfiguration(_) => "invalid_configuration",
        EngineError::Internal(_) => "internal",
    }
}
