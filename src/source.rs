use crate::config::DataSourceConfig;
use crate::model::{District, User};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("select a data source first")]
    NoDataSource,
    #[error("{0:#}")]
    Load(anyhow::Error),
}

impl ReloadError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoDataSource => "no_data_source",
            Self::Load(_) => "reload_failed",
        }
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.to_string_lossy()))
}

/// Reads the whole users collection. Nothing is returned on partial failure.
pub fn load_users(cfg: &DataSourceConfig) -> anyhow::Result<Vec<User>> {
    load_collection(&cfg.users_path())
}

pub fn load_districts(cfg: &DataSourceConfig) -> anyhow::Result<Vec<District>> {
    load_collection(&cfg.districts_path())
}
