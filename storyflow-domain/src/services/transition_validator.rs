// /////////////////////////////////////////////////////////////////////////////
// Storyflow
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Transition Validator (C2)
//!
//! Given `(from, to)`, decides valid/invalid with a human-readable
//! rationale. Validation is pure: no I/O, no mutation.

use super::StateCatalog;

/// The outcome of validating a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub ok: bool,
    /// Present on failure: distinguishes "unknown state" from "illegal
    /// transition" and lists the valid successors of `from` when `from`
    /// is known.
    pub reason: Option<String>,
}

impl TransitionOutcome {
    fn ok() -> Self {
        Self { ok: true, reason: None }
    }

    fn fail(reason: String) -> Self {
        Self { ok: false, reason: Some(reason) }
    }
}

/// Validates transitions against a [`StateCatalog`]. Holds a reference to
/// the catalog rather than owning a copy, since the catalog is built once
/// at startup and shared across every validation call.
pub struct TransitionValidator<'a> {
    catalog: &'a StateCatalog,
}

impl<'a> TransitionValidator<'a> {
    pub fn new(catalog: &'a StateCatalog) -> Self {
        Self { catalog }
    }

    /// `ok` iff both stages are known and `to` is in the successor set of
    /// `from`.
    pub fn validate(&self, from: &str, to: &str) -> TransitionOutcome {
        if !self.catalog.is_known(from) {
            return TransitionOutcome::fail(format!("unknown source stage '{from}'"));
        }
        if !self.catalog.is_known(to) {
            return TransitionOutcome::fail(format!("unknown target stage '{to}'"));
        }
        let successors = self.catalog.next_states(from);
        if successors.iter().any(|s| s == to) {
            TransitionOutcome::ok()
        } else {
            TransitionOutcome::fail(format!(
                "'{to}' is not a valid successor of '{from}'; valid successors: [{}]",
                successors.join(", ")
            ))
        }
    }

    pub fn is_valid(&self, from: &str, to: &str) -> bool {
        self.validate(from, to).ok
    }

    pub fn next_states(&self, from: &str) -> Vec<String> {
        self.catalog.next_states(from)
    }

    /// `ok` iff every adjacent pair in `seq` is a valid transition; an
    /// empty or single-known-stage sequence is trivially ok.
    pub fn validate_path(&self, seq: &[String]) -> TransitionOutcome {
        if seq.len() <= 1 {
            if let Some(only) = seq.first() {
                if !self.catalog.is_known(only) {
                    return TransitionOutcome::fail(format!("unknown stage '{only}'"));
                }
            }
            return TransitionOutcome::ok();
        }
        for pair in seq.windows(2) {
            let outcome = self.validate(&pair[0], &pair[1]);
            if !outcome.ok {
                return outcome;
            }
        }
        TransitionOutcome::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StateCatalog {
        StateCatalog::new()
    }

    #[test]
    fn valid_transition_is_ok() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        assert!(validator.is_valid("Title.From.Idea", "Script.From.Idea.Title"));
    }

    #[test]
    fn illegal_transition_is_rejected_with_reason() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        let outcome = validator.validate("Title.From.Idea", "Publishing");
        assert!(!outcome.ok);
        assert!(outcome.reason.unwrap().contains("Script.From.Idea.Title"));
    }

    #[test]
    fn unknown_stage_is_rejected() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        let outcome = validator.validate("Bogus", "Title.From.Idea");
        assert!(!outcome.ok);
        assert!(outcome.reason.unwrap().contains("unknown"));
    }

    #[test]
    fn validate_path_roundtrip_matches_next_states() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        for from in catalog.known_states() {
            for to in validator.next_states(from) {
                assert!(validator.is_valid(from, &to));
            }
        }
    }

    #[test]
    fn empty_and_singleton_paths_are_trivially_ok() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        assert!(validator.validate_path(&[]).ok);
        assert!(validator.validate_path(&["Title.From.Idea".to_string()]).ok);
    }

    #[test]
    fn validate_path_checks_every_adjacent_pair() {
        let catalog = catalog();
        let validator = TransitionValidator::new(&catalog);
        let good = vec![
            "Title.From.Idea".to_string(),
            "Script.From.Idea.Title".to_string(),
            "Review.Script.Grammar".to_string(),
        ];
        assert!(validator.validate_path(&good).ok);

        let bad = vec!["Title.From.Idea".to_string(), "Publishing".to_string()];
        assert!(!validator.validate_path(&bad).ok);
    }
}
