//! # YAML Dataset Repository
//!
//! Loads the baseline snapshot (programs, donors, employees) the dashboard
//! simulates against. The file is read-only from the server's point of view;
//! every what-if change lives in the override store instead.

use anyhow::{Context, Result};
use shared::Dataset;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct DatasetRepository {
    path: PathBuf,
}

impl DatasetRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        let yaml_content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read dataset {:?}", self.path))?;
        let dataset: Dataset = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse dataset {:?}", self.path))?;

        warn_on_dangling_program_references(&dataset);
        info!(
            "Loaded dataset from {:?}: {} programs, {} donors, {} employees",
            self.path,
            dataset.programs.len(),
            dataset.donors.len(),
            dataset.employees.len()
        );
        Ok(dataset)
    }
}

/// References to unknown programs are tolerated by the engine but usually
/// mean the file is out of date, so they are worth a log line.
fn warn_on_dangling_program_references(dataset: &Dataset) {
    let program_ids: HashSet<&str> = dataset.programs.iter().map(|p| p.id.as_str()).collect();

    for donor in &dataset.donors {
        for preference in &donor.preferences {
            if !program_ids.contains(preference.program_id.as_str()) {
                warn!(
                    "Donor {} prefers unknown program {}",
                    donor.id, preference.program_id
                );
            }
        }
    }

    for employee in &dataset.employees {
        if !program_ids.contains(employee.program_id.as_str()) {
            warn!(
                "Employee {} is assigned to unknown program {}",
                employee.id, employee.program_id
            );
        }
    }
}
