//! Check registry.
//!
//! # Responsibilities
//! - Define what a health check is (`Checker`)
//! - Hold the name → check mapping shared by every readiness request

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Reason a health check failed.
///
/// The message is reported verbatim in the readiness payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CheckError {
    message: String,
}

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for CheckError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CheckError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A zero-argument health check.
///
/// Implementations may be invoked concurrently by overlapping readiness
/// requests, so they must be `Send + Sync`. They run on the blocking pool
/// and should return quickly: nothing bounds how long a single check takes.
pub trait Checker: Send + Sync {
    fn check(&self) -> Result<(), CheckError>;
}

impl<F, E> Checker for F
where
    F: Fn() -> Result<(), E> + Send + Sync,
    E: fmt::Display,
{
    fn check(&self) -> Result<(), CheckError> {
        self().map_err(|e| CheckError::new(e.to_string()))
    }
}

/// Named collection of health checks.
///
/// Names are unique; adding a check under an existing name replaces it.
#[derive(Clone, Default)]
pub struct Checks {
    inner: HashMap<String, Arc<dyn Checker>>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check, replacing any existing check with the same name.
    pub fn add_check(&mut self, name: impl Into<String>, check: impl Checker + 'static) {
        self.inner.insert(name.into(), Arc::new(check));
    }

    /// Builder-style variant of [`Checks::add_check`].
    pub fn with(mut self, name: impl Into<String>, check: impl Checker + 'static) -> Self {
        self.add_check(name, check);
        self
    }

    /// Add an already shared check.
    pub fn add_shared(&mut self, name: impl Into<String>, check: Arc<dyn Checker>) {
        self.inner.insert(name.into(), check);
    }

    /// Iterate over `(name, check)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Checker)> {
        self.inner
            .iter()
            .map(|(name, check)| (name.as_str(), check.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }
}

impl fmt::Debug for Checks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.keys()).finish()
    }
}

impl<N> FromIterator<(N, Arc<dyn Checker>)> for Checks
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, Arc<dyn Checker>)>>(iter: I) -> Self {
        let mut checks = Self::new();
        for (name, check) in iter {
            checks.add_shared(name, check);
        }
        checks
    }
}

impl From<Option<Checks>> for Checks {
    fn from(checks: Option<Checks>) -> Self {
        checks.unwrap_or_default()
    }
}
