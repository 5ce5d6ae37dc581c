// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Engine Configuration
//!
//! The recognised options from `spec.md` §6 ("Configuration (recognised
//! options)"), loaded as a typed [`EngineConfig`] via the `config` crate:
//! a TOML file layered under `STORYFLOW_*` environment variable
//! overrides, validated on load.
//!
//! The stage manifest (pass/fail targets, per-stage threshold overrides,
//! static next-stage for generation stages) is deliberately **not**
//! part of this struct — `spec.md` §9 Open Question (3) treats those as
//! stage-manifest data (see `storyflow_domain::services::StageManifestRegistry`),
//! not user-facing configuration or hardcoded constants.

use serde::Deserialize;
use storyflow_domain::error::EngineError;

/// Typed, validated engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Location of the persistent store, e.g. `sqlite://./storyflow.db`
    /// or `sqlite::memory:` for ephemeral runs.
    pub database_path: String,

    /// Applied to review stages that do not declare their own
    /// `pass_threshold` in the stage manifest.
    pub pass_threshold_default: i64,

    /// How long a worker sleeps after a `NoWork` result before polling
    /// its stage again.
    pub worker_poll_interval_ms: u64,

    /// Maximum retry attempts for a transient store error before the
    /// driver surfaces it.
    pub retry_max_attempts: u32,

    /// Base backoff duration for the first retry; subsequent retries
    /// double it (with jitter) up to `retry_max_attempts`.
    pub retry_base_backoff_ms: u64,

    /// Subset of stage names the driver may schedule a worker for.
    /// `None` means all stages the manifest registry knows about.
    pub stages_enabled: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite://./storyflow.db".to_string(),
            pass_threshold_default: 75,
            worker_poll_interval_ms: 500,
            retry_max_attempts: 5,
            retry_base_backoff_ms: 100,
            stages_enabled: None,
        }
    }
}

impl EngineConfig {
    /// Validate bounds that `serde`'s structural deserialization can't
    /// express: `pass_threshold_default` in `0..=100`, a non-empty
    /// `database_path`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.database_path.trim().is_empty() {
            return Err(EngineError::InvalidConfiguration("database_path must not be empty".to_string()));
        }
        if !(0..=100).contains(&self.pass_threshold_default) {
            return Err(EngineError::InvalidConfiguration(format!(
                "pass_threshold_default must be between 0 and 100, got {}",
                self.pass_threshold_default
            )));
        }
        if self.worker_poll_interval_ms == 0 {
            return Err(EngineError::InvalidConfiguration("worker_poll_interval_ms must be positive".to_string()));
        }
        if self.retry_base_backoff_ms == 0 {
            return Err(EngineError::InvalidConfiguration("retry_base_backoff_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Whether `stage` is eligible for scheduling under `stages_enabled`
    /// (absent means every stage is enabled).
    pub fn is_stage_enabled(&self, stage: &str) -> bool {
        match &self.stages_enabled {
            None => true,
            Some(enabled) => enabled.iter().any(|s| s == stage),
        }
    }

    /// Load configuration by layering, in increasing precedence: the
    /// struct defaults, an optional TOML file, and `STORYFLOW_*`
    /// environment variables (e.g. `STORYFLOW_DATABASE_PATH`).
    pub fn load(file_path: Option<&std::path::Path>) -> Result<Self, EngineError> {
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&Self::default()).map_err(config_err)?);

        if let Some(path) = file_path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(config::Environment::with_prefix("STORYFLOW").separator("_"));

        let built = builder.build().map_err(config_err)?;
        let engine_config: EngineConfig = built.try_deserialize().map_err(config_err)?;
        engine_config.validate()?;
        Ok(engine_config)
    }
}

fn config_err(e: config::ConfigError) -> EngineError {
    EngineError::InvalidConfiguration(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = EngineConfig::default();
        assert_eq!(config.pass_threshold_default, 75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut config = EngineConfig::default();
        config.pass_threshold_default = 150;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_database_path() {
        let mut config = EngineConfig::default();
        config.database_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn stage_enabled_defaults_to_all() {
        let config = EngineConfig::default();
        assert!(config.is_stage_enabled("Title.From.Idea"));
    }

    #[test]
    fn stage_enabled_respects_allowlist() {
        let mut config = EngineConfig::default();
        config.stages_enabled = Some(vec!["Title.From.Idea".to_string()]);
        assert!(config.is_stage_enabled("Title.From.Idea"));
        assert!(!config.is_stage_enabled("Publishing"));
    }

    #[test]
    fn load_without_file_uses_defaults_and_env() {
        std::env::set_var("STORYFLOW_PASS_THRESHOLD_DEFAULT", "80");
        let config = EngineConfig::load(None).expect("should load from defaults + env");
        assert_eq!(config.pass_threshold_default, 80);
        std::env::remove_var("STORYFLOW_PASS_THRESHOLD_DEFAULT");
    }
}
