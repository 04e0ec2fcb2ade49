//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every probe carries the target its kind needs
//! - Validate value ranges (timeouts > 0, addresses have a port)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Duplicate probe names are allowed; the last definition wins

use thiserror::Error;

use crate::config::schema::{FileConfig, ProbeConfig, ProbeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("probe #{index} has an empty name")]
    EmptyProbeName { index: usize },

    #[error("probe '{probe}' requires '{field}'")]
    MissingField { probe: String, field: &'static str },

    #[error("probe '{probe}' address '{address}' is not host:port")]
    InvalidAddress { probe: String, address: String },

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(String),
}

/// Check a parsed config for semantic errors.
pub fn validate_config(config: &FileConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let timeouts = [
        ("timeouts.read_ms", config.timeouts.read_ms),
        ("timeouts.read_header_ms", config.timeouts.read_header_ms),
        ("timeouts.idle_ms", config.timeouts.idle_ms),
        ("timeouts.write_ms", config.timeouts.write_ms),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name.to_string()));
        }
    }

    for (index, probe) in config.probes.iter().enumerate() {
        validate_probe(index, probe, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_probe(index: usize, probe: &ProbeConfig, errors: &mut Vec<ValidationError>) {
    if probe.name.trim().is_empty() {
        errors.push(ValidationError::EmptyProbeName { index });
    }

    match probe.kind {
        ProbeKind::Tcp => {
            match probe.address.as_deref() {
                None | Some("") => errors.push(ValidationError::MissingField {
                    probe: probe.name.clone(),
                    field: "address",
                }),
                Some(address) if !is_host_port(address) => {
                    errors.push(ValidationError::InvalidAddress {
                        probe: probe.name.clone(),
                        address: address.to_string(),
                    })
                }
                Some(_) => {}
            }
            if probe.timeout_ms == 0 {
                errors.push(ValidationError::ZeroTimeout(format!(
                    "probes.{}.timeout_ms",
                    probe.name
                )));
            }
        }
        ProbeKind::File => {
            if probe.path.as_ref().map_or(true, |p| p.as_os_str().is_empty()) {
                errors.push(ValidationError::MissingField {
                    probe: probe.name.clone(),
                    field: "path",
                });
            }
        }
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
