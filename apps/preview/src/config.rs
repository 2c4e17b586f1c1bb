use std::net::{IpAddr, Ipv4Addr};

use anyhow::{bail, Context, Result};

use crate::sync::projector::PreviewTarget;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub rust_log: String,
    /// Output targets the host page provides.
    pub preview_targets: Vec<PreviewTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            rust_log: "info".to_string(),
            preview_targets: PreviewTarget::ALL.to_vec(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            bind_addr: match std::env::var("BIND_ADDR") {
                Ok(raw) => parse_bind_addr(&raw)?,
                Err(_) => defaults.bind_addr,
            },
            port: match std::env::var("PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                Err(_) => defaults.port,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            preview_targets: match std::env::var("PREVIEW_TARGETS") {
                Ok(raw) => parse_targets(&raw)?,
                Err(_) => defaults.preview_targets,
            },
        })
    }
}

/// Parses an IPv4 or IPv6 address without a port, e.g. `0.0.0.0` or `::1`.
fn parse_bind_addr(raw: &str) -> Result<IpAddr> {
    raw.trim()
        .parse::<IpAddr>()
        .with_context(|| format!("BIND_ADDR must be an IP address, got '{raw}'"))
}

/// Parses a comma-separated list of preview target ids, e.g. `resumeName,resumeSkills`.
fn parse_targets(raw: &str) -> Result<Vec<PreviewTarget>> {
    let mut targets = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some(target) = PreviewTarget::from_id(id) else {
            bail!("PREVIEW_TARGETS contains unknown target '{id}'");
        };
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(targets)
}
