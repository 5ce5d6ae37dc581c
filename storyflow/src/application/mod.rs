// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Layer
//!
//! Orchestrates the domain crate's ports into the running engine: the
//! Work Selector's infrastructure glue (`selector`), the Stage Dispatcher's
//! ten-step transactional cycle (`dispatcher`), the static `stage →
//! Processor` registry (`processors`), and the worker/driver loop that
//! pulls both of those in daemon or one-shot mode (`driver`).

pub mod dispatcher;
pub mod driver;
pub mod processors;
pub mod selector;

pub use dispatcher::{DispatchOutcome, StageDispatcher};
pub use driver::{Driver, DriverConfig};
pub use processors::ProcessorRegistry;
pub use selector::{SelectionPreview, WorkSelector};
