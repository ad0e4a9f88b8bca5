use crate::config::DataSourceConfig;
use crate::prompt::PromptBook;
use crate::store::AdminStore;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub source: Option<DataSourceConfig>,
    pub store: AdminStore,
    pub prompts: PromptBook,
}
