//! Resolution of the effective server settings.

use std::time::Duration;

/// Default bind address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:3674";

/// Default readiness route.
pub const DEFAULT_READINESS_PATH: &str = "/ready";

/// Default liveness route.
pub const DEFAULT_LIVENESS_PATH: &str = "/live";

pub const ENV_ADDR: &str = "FLEX_READYSRV_ADDR";
pub const ENV_READINESS_PATH: &str = "FLEX_READYSRV_READINESS_PATH";
pub const ENV_LIVENESS_PATH: &str = "FLEX_READYSRV_LIVENESS_PATH";

/// Timeouts applied by the HTTP transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Maximum time to read a request body.
    pub read_timeout: Duration,

    /// Maximum time to receive the request head.
    pub read_header_timeout: Duration,

    /// Maximum time a connection may sit idle waiting for the next request.
    pub idle_timeout: Duration,

    /// Maximum time to produce a response.
    pub write_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_secs(5),
            read_header_timeout: Duration::from_secs(1),
            idle_timeout: Duration::from_secs(1),
            write_timeout: Duration::from_secs(15),
        }
    }
}

/// Explicitly supplied values; `None` defers to the environment, then defaults.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub address: Option<String>,
    pub readiness_path: Option<String>,
    pub liveness_path: Option<String>,
    pub http: Option<HttpSettings>,
}

/// Fully resolved settings for one server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub address: String,
    pub readiness_path: String,
    pub liveness_path: String,
    pub http: HttpSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::resolve_with(&Overrides::default(), |_| None)
    }
}

impl ServerSettings {
    /// Resolve against the process environment.
    pub fn resolve(overrides: &Overrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve using `env` as the environment lookup.
    pub fn resolve_with<F>(overrides: &Overrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = non_empty(overrides.address.clone())
            .or_else(|| non_empty(env(ENV_ADDR)))
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let route = |explicit: &Option<String>, key: &str, default: &str| {
            [explicit.clone(), env(key)]
                .into_iter()
                .flatten()
                .find_map(|raw| routable(&raw))
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            address,
            readiness_path: route(
                &overrides.readiness_path,
                ENV_READINESS_PATH,
                DEFAULT_READINESS_PATH,
            ),
            liveness_path: route(
                &overrides.liveness_path,
                ENV_LIVENESS_PATH,
                DEFAULT_LIVENESS_PATH,
            ),
            http: overrides.http.unwrap_or_default(),
        }
    }

    /// Address handed to the listener. A bare `:port` binds every IPv4 interface.
    pub fn bind_address(&self) -> String {
        match self.address.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => self.address.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalized route, or `None` when the value is empty or uses router
/// capture syntax (`{name}`, `:name`, `*rest`).
fn routable(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let path = normalize_path(raw);
    let literal = !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'));
    if literal {
        Some(path)
    } else {
        tracing::warn!(path = raw, "Ignoring route that is not a literal path");
        None
    }
}

/// Clean a route into an absolute path: `ready/` → `/ready`, `/a//b/../c` → `/a/c`.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}
