use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictFilter {
    pub enabled: bool,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOnlyFilter {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub district: DistrictFilter,
    pub active_only: ActiveOnlyFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            district: DistrictFilter {
                enabled: false,
                value: -1,
            },
            active_only: ActiveOnlyFilter::default(),
        }
    }
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.district.enabled || self.active_only.enabled
    }
}

pub fn filter_district(state: &FilterState, district: DistrictFilter) -> FilterState {
    FilterState { district, ..*state }
}

pub fn filter_active_only(state: &FilterState, active_only: ActiveOnlyFilter) -> FilterState {
    FilterState {
        active_only,
        ..*state
    }
}

pub fn reset() -> FilterState {
    FilterState::default()
}
