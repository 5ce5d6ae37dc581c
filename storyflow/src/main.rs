// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Storyflow Driver Binary
//!
//! The composition root: parses CLI arguments, loads configuration, opens
//! the SQLite store, wires the State Catalog, Stage Manifest Registry,
//! repositories, Work Selector, Processor registry, and Stage Dispatcher
//! into a [`storyflow::application::Driver`], then hands control to
//! [`storyflow::presentation`] for the `serve`/`step` command surface.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use storyflow::application::{Driver, DriverConfig, ProcessorRegistry, StageDispatcher, WorkSelector};
use storyflow::domain::entities::ArtifactKind;
use storyflow::domain::services::{StageManifestRegistry, StateCatalog};
use storyflow::infrastructure::config::EngineConfig;
use storyflow::infrastructure::idea_source::{default_ideas_dir, FileIdeaSource};
use storyflow::infrastructure::metrics::EngineMetrics;
use storyflow::infrastructure::persistence::{initialize_database, SqliteSelectionQueryRepo, SqliteUnitOfWorkFactory};
use storyflow::infrastructure::processors::{AlwaysAcceptDecision, EchoGenerator, FixedScoreReviewer};
use storyflow::{infrastructure, presentation};
use storyflow_bootstrap::exit_code::ExitCode;
use storyflow_bootstrap::shutdown::ShutdownCoordinator;
use storyflow_bootstrap::signals::{create_signal_handler, SystemSignals};
use storyflow_bootstrap::{bootstrap_cli, ValidatedCommand};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    std::process::exit(exit_code.as_i32());
}

async fn run() -> ExitCode {
    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("argument error: {e}");
            return ExitCode::UsageError;
        }
    };

    infrastructure::logging::init_logging(cli.verbose);

    let engine_config = match EngineConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::Config;
        }
    };

    let pool = match initialize_database(&engine_config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to open database '{}': {e}", engine_config.database_path);
            return ExitCode::OsFile;
        }
    };

    let catalog = Arc::new(StateCatalog::new());
    let manifests = Arc::new(StageManifestRegistry::production());

    let uow_factory = Arc::new(SqliteUnitOfWorkFactory::new(pool.clone(), catalog.clone()));
    let selection_repo = Arc::new(SqliteSelectionQueryRepo::new(pool));
    let selector = WorkSelector::new(selection_repo);

    let ideas_dir = default_ideas_dir(&PathBuf::from("."));
    if !ideas_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&ideas_dir) {
            eprintln!("failed to create ideas directory '{}': {e}", ideas_dir.display());
            return ExitCode::CantCreate;
        }
    }
    let idea_source = Arc::new(FileIdeaSource::new(ideas_dir));

    let processors = Arc::new(build_processor_registry());

    let metrics = match EngineMetrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            eprintln!("failed to initialize metrics: {e}");
            return ExitCode::Software;
        }
    };

    let dispatcher = Arc::new(StageDispatcher::new(
        uow_factory,
        selector,
        catalog.clone(),
        manifests,
        processors,
        idea_source,
        engine_config.pass_threshold_default,
    ));

    let driver_config = DriverConfig {
        worker_poll_interval_ms: engine_config.worker_poll_interval_ms,
        retry_max_attempts: engine_config.retry_max_attempts,
        retry_base_backoff_ms: engine_config.retry_base_backoff_ms,
    };
    let driver = Arc::new(Driver::new(dispatcher, metrics, driver_config));

    match cli.command {
        ValidatedCommand::Step { stage } => presentation::run_step(&driver, &stage).await,
        ValidatedCommand::Serve { workers: _ } => {
            let stages: Vec<String> = catalog
                .known_states()
                .filter(|stage| !catalog.is_terminal(stage))
                .filter(|stage| engine_config.is_stage_enabled(stage))
                .map(str::to_string)
                .collect();

            let shutdown = ShutdownCoordinator::new(Duration::from_secs(10));
            let signal_handler = create_signal_handler();
            let shutdown_for_signal = shutdown.clone();
            tokio::spawn(async move {
                signal_handler
                    .wait_for_signal(Box::new(move || {
                        shutdown_for_signal.initiate_shutdown();
                    }))
                    .await;
            });

            presentation::run_serve(driver, stages, shutdown).await
        }
    }
}

/// Binds the production manifest's stage kinds to the deterministic
/// placeholder processors in `infrastructure::processors` — the seam a
/// real deployment replaces with an LLM client, grammar checker, or
/// human review queue.
fn build_processor_registry() -> ProcessorRegistry {
    ProcessorRegistry::new()
        .register("Title.From.Idea", Arc::new(EchoGenerator::new(ArtifactKind::Title)))
        .register("Script.From.Idea.Title", Arc::new(EchoGenerator::new(ArtifactKind::Content)))
        .register("Review.Script.Grammar", Arc::new(FixedScoreReviewer::new(90)))
        .register("Script.Refine.Grammar", Arc::new(EchoGenerator::new(ArtifactKind::Content)))
        .register("Review.Script.Tone", Arc::new(FixedScoreReviewer::new(85)))
        .register("Script.Refine.Tone", Arc::new(EchoGenerator::new(ArtifactKind::Content)))
        .register("Review.Title.Clarity", Arc::new(FixedScoreReviewer::new(85)))
        .register("Title.Refine.Clarity", Arc::new(EchoGenerator::new(ArtifactKind::Title)))
        .register("Story.ExpertReview", Arc::new(AlwaysAcceptDecision::new("Story.Polish")))
        .register("Story.Polish", Arc::new(EchoGenerator::new(ArtifactKind::Content)))
}
