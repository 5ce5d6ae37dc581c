// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Storyflow
//!
//! The application and infrastructure layers of the storyflow workflow
//! engine, built on top of the persistence-agnostic `storyflow-domain`
//! crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  storyflow-bootstrap                    │
//! │   CLI parsing, signal handling, exit codes, platform     │
//! └───────────────────────────┬───────────────────────────────┘
//! ┌───────────────────────────┴───────────────────────────────┐
//! │                  storyflow (this crate)                  │
//! │  ┌─────────────────────┐   ┌───────────────────────────┐  │
//! │  │   application        │   │    infrastructure         │  │
//! │  │  dispatcher, selector │   │  sqlite repos, config,    │  │
//! │  │  driver, processors   │   │  logging, metrics         │  │
//! │  └─────────────────────┘   └───────────────────────────┘  │
//! └───────────────────────────┬───────────────────────────────┘
//! ┌───────────────────────────┴───────────────────────────────┐
//! │                    storyflow-domain                      │
//! │   entities, value objects, domain services, repo traits   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Application layer
//!
//! - [`application::dispatcher`] — the Stage Dispatcher (C5): the single
//!   transactional step that picks a Story, invokes its Processor,
//!   persists the outcome, and transitions state.
//! - [`application::selector`] — the Work Selector (C4) infrastructure
//!   glue: runs the bounded candidate query and hands results to the
//!   domain's pure selection policy.
//! - [`application::processors`] — the static `stage name -> Processor`
//!   registry (`spec.md` §9 "Dynamic dispatch on task_type").
//! - [`application::driver`] — the worker loop: daemon mode (continuous
//!   polling workers) and one-shot mode (`spec.md` §6 "Driver surface").
//!
//! ## Infrastructure layer
//!
//! - [`infrastructure::persistence`] — SQLite-backed repository and
//!   unit-of-work implementations over `sqlx`.
//! - [`infrastructure::config`] — `EngineConfig`, loaded via the `config`
//!   crate from TOML plus `STORYFLOW_*` environment overrides.
//! - [`infrastructure::logging`] — `tracing-subscriber` initialization.
//! - [`infrastructure::metrics`] — Prometheus counters/histograms for
//!   dispatcher outcomes and work-selection latency.

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use storyflow_domain as domain;
