use crate::model::{SortColumn, SortDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub enabled: bool,
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            enabled: false,
            column: SortColumn::Id,
            direction: SortDirection::Asc,
        }
    }
}

/// Partial update merged over the current sort criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SortPatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub column: Option<SortColumn>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
}

pub fn sort(state: &SortState, patch: SortPatch) -> SortState {
    SortState {
        enabled: patch.enabled.unwrap_or(state.enabled),
        column: patch.column.unwrap_or(state.column),
        direction: patch.direction.unwrap_or(state.direction),
    }
}

pub fn reset() -> SortState {
    SortState::default()
}
