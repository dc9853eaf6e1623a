use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskflowError};
use crate::query::{ProjectSort, TaskSort};

pub const CONFIG_FILE: &str = "config.json";
pub const CONFIG_VERSION: u32 = 1;

/// Settings stored in `.taskflow/config.json`. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub default_task_sort: TaskSort,
    pub default_project_sort: ProjectSort,
    /// Write the example projects the first time the project list is read.
    pub seed_projects: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            default_task_sort: TaskSort::DueDate,
            default_project_sort: ProjectSort::Name,
            seed_projects: true,
        }
    }
}

impl Config {
    pub fn path(data_root: &Path) -> PathBuf {
        data_root.join(CONFIG_FILE)
    }

    /// Read `config.json`, refusing versions this build does not understand.
    pub fn load(data_root: &Path) -> Result<Self> {
        let data = fs::read_to_string(Self::path(data_root))?;
        let config: Self = serde_json::from_str(&data)?;
        if config.version != CONFIG_VERSION {
            return Err(TaskflowError::UnsupportedConfig(config.version));
        }
        Ok(config)
    }

    pub fn save(&self, data_root: &Path) -> Result<()> {
        fs::write(Self::path(data_root), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Directory override from `TASKFLOW_DIR`; empty values are ignored.
pub fn dir_override() -> Option<PathBuf> {
    std::env::var("TASKFLOW_DIR")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Log filter directive from `TASKFLOW_LOG`.
pub fn log_filter() -> Option<String> {
    std::env::var("TASKFLOW_LOG").ok().filter(|s| !s.is_empty())
}
