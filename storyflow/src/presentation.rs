// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Presentation Layer
//!
//! Translates the two driver modes `spec.md` §6 specifies ("Driver
//! surface (externally observable)") into CLI-visible behavior: a
//! one-shot `step` command that runs exactly one dispatcher cycle and
//! reports its outcome, and a `serve` command that runs one worker per
//! enabled stage until a shutdown signal arrives.
//!
//! This module owns output formatting and exit-code selection only — the
//! composition root (`main.rs`) is what builds the `Driver` and
//! `ShutdownCoordinator` this module is handed.

use std::sync::Arc;

use storyflow_bootstrap::exit_code::ExitCode;
use storyflow_bootstrap::shutdown::ShutdownCoordinator;
use storyflow_domain::error::EngineError;

use crate::application::{DispatchOutcome, Driver};

/// Run exactly one dispatcher cycle for `stage` and report the result.
///
/// Exit codes per `spec.md` §6 "One-shot mode": 0 for `Advanced`,
/// `NoWork`, or `AlreadyDone`; non-zero for a logic or fatal failure.
pub async fn run_step(driver: &Driver, stage: &str) -> ExitCode {
    match driver.step_with_retry(stage).await {
        Ok(outcome) => {
            println!("{}", describe_outcome(stage, &outcome));
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("{}", describe_error(stage, &e));
            exit_code_for_error(&e)
        }
    }
}

/// Run one worker per stage in `stages` until `shutdown` is triggered
/// (typically by a signal handler running concurrently).
///
/// Exit codes per `spec.md` §6 "Daemon mode": 0 for a clean shutdown,
/// non-zero only if every worker fails to even start (an init failure
/// surfaces before this function is reached, in `main.rs`'s wiring).
pub async fn run_serve(driver: Arc<Driver>, stages: Vec<String>, shutdown: ShutdownCoordinator) -> ExitCode {
    println!("storyflow serving {} stage(s): {}", stages.len(), stages.join(", "));

    let mut workers = Vec::with_capacity(stages.len());
    for stage in stages {
        let driver = Arc::clone(&driver);
        let token = shutdown.token();
        workers.push(tokio::spawn(async move {
            let result = driver.run_worker(&stage, token).await;
            (stage, result)
        }));
    }

    let mut exit_code = ExitCode::Success;
    for worker in workers {
        match worker.await {
            Ok((stage, Ok(()))) => println!("worker for '{stage}' shut down cleanly"),
            Ok((stage, Err(e))) => {
                eprintln!("{}", describe_error(&stage, &e));
                exit_code = exit_code_for_error(&e);
            }
            Err(join_err) => {
                eprintln!("worker task panicked: {join_err}");
                exit_code = ExitCode::Software;
            }
        }
    }

    shutdown.complete_shutdown();
    exit_code
}

fn describe_outcome(stage: &str, outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Advanced { story_id, from, to, artifact_or_review_id } => {
            format!("story {story_id} advanced {from} -> {to} (record {artifact_or_review_id:?})")
        }
        DispatchOutcome::NoWork => format!("stage '{stage}': no candidate story"),
        DispatchOutcome::AlreadyDone { story_id } => format!("stage '{stage}': story {story_id} already done, skipped"),
    }
}

/// Every user-facing failure line carries the stage name, story id (when
/// known), and error kind, per `spec.md` §7.
fn describe_error(stage: &str, error: &EngineError) -> String {
    format!("stage '{stage}' failed: {error}")
}

fn exit_code_for_error(error: &EngineError) -> ExitCode {
    match error {
        EngineError::InvalidConfiguration(_) => ExitCode::Config,
        EngineError::UnknownStage(_) => ExitCode::UsageError,
        EngineError::StoreFatal(_) => ExitCode::Software,
        EngineError::Internal(_) => ExitCode::Software,
        _ => ExitCode::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_outcome_names_the_transition() {
        let outcome = DispatchOutcome::Advanced {
            story_id: storyflow_domain::value_objects::StoryId::new(7),
            from: "Title.From.Idea".to_string(),
            to: "Script.From.Idea.Title".to_string(),
            artifact_or_review_id: Some(3),
        };
        let line = describe_outcome("Title.From.Idea", &outcome);
        assert!(line.contains("Title.From.Idea -> Script.From.Idea.Title"));
    }

    #[test]
    fn config_errors_map_to_the_config_exit_code() {
        let error = EngineError::InvalidConfiguration("bad threshold".to_string());
        assert_eq!(exit_code_for_error(&error), ExitCode::Config);
    }

    #[test]
    fn unknown_stage_maps_to_usage_error() {
        let error = EngineError::UnknownStage("Nonexistent".to_string());
        assert_eq!(exit_code_for_error(&error), ExitCode::UsageError);
    }
}
