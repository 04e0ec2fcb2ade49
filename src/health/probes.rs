//! Built-in checks used by the standalone binary.
//!
//! Library users normally register their own closures; these cover the
//! common "is the dependency reachable" cases expressible in a config file.

use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::{ProbeConfig, ProbeKind};
use crate::health::checks::{CheckError, Checker, Checks};

/// Succeeds when a TCP connection to `address` opens within `timeout`.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }
}

impl Checker for TcpProbe {
    fn check(&self) -> Result<(), CheckError> {
        let mut last_err = None;
        for addr in self.address.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return Ok(()),
                Err(e) => last_err = Some(e),
            }
        }
        Err(match last_err {
            Some(e) => e.into(),
            None => CheckError::new(format!("{} did not resolve to any address", self.address)),
        })
    }
}

/// Succeeds when `path` exists.
#[derive(Debug, Clone)]
pub struct FileProbe {
    path: PathBuf,
}

impl FileProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Checker for FileProbe {
    fn check(&self) -> Result<(), CheckError> {
        if self.path.try_exists()? {
            Ok(())
        } else {
            Err(CheckError::new(format!(
                "{} does not exist",
                self.path.display()
            )))
        }
    }
}

/// Build a registry from validated probe definitions.
pub fn from_config(probes: &[ProbeConfig]) -> Checks {
    probes
        .iter()
        .map(|probe| {
            let check: Arc<dyn Checker> = match probe.kind {
                ProbeKind::Tcp => Arc::new(TcpProbe::new(
                    probe.address.clone().unwrap_or_default(),
                    Duration::from_millis(probe.timeout_ms),
                )),
                ProbeKind::File => {
                    Arc::new(FileProbe::new(probe.path.clone().unwrap_or_default()))
                }
            };
            (probe.name.clone(), check)
        })
        .collect()
}
