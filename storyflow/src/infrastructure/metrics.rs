// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Metrics
//!
//! Prometheus-based observability for the dispatcher and work selector:
//! a `Registry` plus a handful of named counters/histograms assembled
//! once at startup and cloned into every worker.

use prometheus::{Histogram, HistogramOpts, IntCounterVec, IntGaugeVec, Opts, Registry};
use std::sync::Arc;
use storyflow_domain::error::EngineError;

/// Counters and histograms tracking dispatcher/selector activity.
///
/// Cloning is cheap: every metric handle is an `Arc`-backed Prometheus
/// type, so a single `EngineMetrics` can be shared across worker tasks.
#[derive(Clone)]
pub struct EngineMetrics {
    registry: Arc<Registry>,

    /// `storyflow_steps_advanced_total{stage}` — one per successful
    /// `Advanced` outcome.
    steps_advanced_total: IntCounterVec,

    /// `storyflow_steps_failed_total{stage, kind}` — one per non-`NoWork`,
    /// non-`Advanced`, non-`AlreadyDone` outcome.
    steps_failed_total: IntCounterVec,

    /// `storyflow_no_work_total{stage}` — polls that found nothing to do.
    no_work_total: IntCounterVec,

    /// `storyflow_work_selection_seconds{stage}` — latency of the Work
    /// Selector's bounded candidate query.
    work_selection_seconds: Histogram,

    /// `storyflow_stage_queue_depth{stage}` — `count_by_state(stage)`,
    /// refreshed by the driver loop each poll.
    stage_queue_depth: IntGaugeVec,
}

impl EngineMetrics {
    pub fn new() -> Result<Self, EngineError> {
        let registry = Registry::new();

        let steps_advanced_total = IntCounterVec::new(
            Opts::new("steps_advanced_total", "Stage steps that advanced a story to a new state").namespace("storyflow"),
            &["stage"],
        )
        .map_err(metrics_err)?;

        let steps_failed_total = IntCounterVec::new(
            Opts::new("steps_failed_total", "Stage steps that ended in a non-advancing error").namespace("storyflow"),
            &["stage", "kind"],
        )
        .map_err(metrics_err)?;

        let no_work_total =
            IntCounterVec::new(Opts::new("no_work_total", "Polls that found no candidate story").namespace("storyflow"), &["stage"])
                .map_err(metrics_err)?;

        let work_selection_seconds = Histogram::with_opts(
            HistogramOpts::new("work_selection_seconds", "Latency of the work-selection candidate query").namespace("storyflow"),
        )
        .map_err(metrics_err)?;

        let stage_queue_depth =
            IntGaugeVec::new(Opts::new("stage_queue_depth", "Stories currently queued in a stage").namespace("storyflow"), &["stage"])
                .map_err(metrics_err)?;

        registry.register(Box::new(steps_advanced_total.clone())).map_err(metrics_err)?;
        registry.register(Box::new(steps_failed_total.clone())).map_err(metrics_err)?;
        registry.register(Box::new(no_work_total.clone())).map_err(metrics_err)?;
        registry.register(Box::new(work_selection_seconds.clone())).map_err(metrics_err)?;
        registry.register(Box::new(stage_queue_depth.clone())).map_err(metrics_err)?;

        Ok(Self {
            registry: Arc::new(registry),
            steps_advanced_total,
            steps_failed_total,
            no_work_total,
            work_selection_seconds,
            stage_queue_depth,
        })
    }

    pub fn record_advanced(&self, stage: &str) {
        self.steps_advanced_total.with_label_values(&[stage]).inc();
    }

    pub fn record_failed(&self, stage: &str, kind: &str) {
        self.steps_failed_total.with_label_values(&[stage, kind]).inc();
    }

    pub fn record_no_work(&self, stage: &str) {
        self.no_work_total.with_label_values(&[stage]).inc();
    }

    pub fn time_selection(&self) -> prometheus::HistogramTimer {
        self.work_selection_seconds.start_timer()
    }

    pub fn set_queue_depth(&self, stage: &str, depth: i64) {
        self.stage_queue_depth.with_label_values(&[stage]).set(depth);
    }

    /// Render the current metric set in Prometheus text exposition
    /// format, for a `/metrics` scrape.
    pub fn encode(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        String::from_utf8(buffer).unwrap_or_default()
    }
}

fn metrics_err(e: prometheus::Error) -> EngineError {
    EngineError::Internal(format!("metrics registration failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_encodes_advanced_counter() {
        let metrics = EngineMetrics::new().expect("metrics should build");
        metrics.record_advanced("Title.From.Idea");
        let rendered = metrics.encode();
        assert!(rendered.contains("storyflow_steps_advanced_total"));
    }

    #[test]
    fn queue_depth_gauge_reflects_latest_set() {
        let metrics = EngineMetrics::new().expect("metrics should build");
        metrics.set_queue_depth("Publishing", 3);
        let rendered = metrics.encode();
        assert!(rendered.contains("storyflow_stage_queue_depth"));
    }
}
