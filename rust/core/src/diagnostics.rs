// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured diagnostics shared by all validation stages.
//!
//! Every suppressed problem (dropped edge, skipped door, missing name)
//! produces a [`Diagnostic`] instead of a bare log line, so callers can decide
//! which severities are fatal. Warnings also flow into the constraints report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable machine-readable code, e.g. `unknown-edge-endpoint`.
    pub code: String,
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Ids of the entities involved (space ids, storey ids, edge endpoints).
    pub refs: Vec<String>,
}

impl Diagnostic {
    pub fn warning(code: &str, message: impl Into<String>, refs: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warning,
            message: message.into(),
            refs: refs.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn error(code: &str, message: impl Into<String>, refs: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
            refs: refs.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.refs.is_empty() {
            write!(f, " ({})", self.refs.join(", "))?;
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// True when any diagnostic has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// The error-severity subset, used for fail-fast reporting.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.0
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    /// The warning-severity subset, surfaced in the constraints report.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.0
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
