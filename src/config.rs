use serde::Deserialize;
use std::path::PathBuf;

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_districts_file() -> String {
    "districts.json".to_string()
}

/// Where the static users/districts collections are read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    pub path: PathBuf,
    #[serde(default = "default_users_file")]
    pub users_file: String,
    #[serde(default = "default_districts_file")]
    pub districts_file: String,
}

impl DataSourceConfig {
    pub fn users_path(&self) -> PathBuf {
        self.path.join(&self.users_file)
    }

    pub fn districts_path(&self) -> PathBuf {
        self.path.join(&self.districts_file)
    }
}
