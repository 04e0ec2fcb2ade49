//! Readiness evaluation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::health::checks::Checks;

/// Outcome of a single check for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub ok: bool,
    /// Failure reason; empty when `ok` is true.
    pub messages: String,
}

impl ProbeResult {
    pub fn passed() -> Self {
        Self {
            ok: true,
            messages: String::new(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            messages: reason.into(),
        }
    }
}

/// Aggregate of every check's result for one readiness request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessReport {
    results: HashMap<String, ProbeResult>,
    ready: bool,
}

/// The report for an empty registry.
impl Default for ReadinessReport {
    fn default() -> Self {
        Self {
            results: HashMap::new(),
            ready: true,
        }
    }
}

impl ReadinessReport {
    /// Run every check exactly once, sequentially.
    ///
    /// An empty registry is vacuously ready.
    pub fn evaluate(checks: &Checks) -> Self {
        let mut ready = true;
        let mut results = HashMap::with_capacity(checks.len());

        for (name, check) in checks.iter() {
            let result = match check.check() {
                Ok(()) => ProbeResult::passed(),
                Err(err) => {
                    ready = false;
                    tracing::debug!(check = name, error = %err, "Health check failed");
                    ProbeResult::failed(err.message())
                }
            };
            results.insert(name.to_string(), result);
        }

        Self { results, ready }
    }

    /// True when every check passed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn get(&self, name: &str) -> Option<&ProbeResult> {
        self.results.get(name)
    }

    pub fn results(&self) -> &HashMap<String, ProbeResult> {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
