//! Server configuration read from `FUNDFLOW_*` environment variables.

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::simulation_service::OPERATIONAL_OVERHEAD;
use crate::domain::SimulationConfig;

pub const BIND_ADDR_VAR: &str = "FUNDFLOW_BIND_ADDR";
pub const DATA_DIR_VAR: &str = "FUNDFLOW_DATA_DIR";
pub const DATASET_VAR: &str = "FUNDFLOW_DATASET";
pub const OPERATIONAL_OVERHEAD_VAR: &str = "FUNDFLOW_OPERATIONAL_OVERHEAD";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = "./data";
const DATASET_FILE_NAME: &str = "dataset.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `overrides.yaml` (and the dataset unless overridden)
    pub data_dir: PathBuf,
    pub dataset_path: PathBuf,
    pub simulation: SimulationConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; unset and blank variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .trim()
            .parse()
            .with_context(|| format!("{} is not a socket address: {:?}", BIND_ADDR_VAR, bind_addr))?;

        let data_dir = PathBuf::from(read(DATA_DIR_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let dataset_path = read(DATASET_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DATASET_FILE_NAME));

        let operational_overhead = match read(OPERATIONAL_OVERHEAD_VAR) {
            Some(raw) => parse_overhead(&raw)?,
            None => OPERATIONAL_OVERHEAD,
        };

        Ok(Self {
            bind_addr,
            data_dir,
            dataset_path,
            simulation: SimulationConfig {
                operational_overhead,
            },
        })
    }
}

fn parse_overhead(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} is not a number: {:?}", OPERATIONAL_OVERHEAD_VAR, raw))?;

    if !value.is_finite() || value < 0.0 {
        return Err(anyhow!(
            "{} must be a non-negative amount, got {}",
            OPERATIONAL_OVERHEAD_VAR,
            value
        ));
    }
    Ok(value)
}
