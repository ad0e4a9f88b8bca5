use crate::model::District;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistrictsState {
    pub districts: Vec<District>,
}

impl DistrictsState {
    pub fn contains(&self, id: i64) -> bool {
        self.districts.iter().any(|d| d.id == id)
    }

    /// id -> display name, used to label table rows.
    pub fn names(&self) -> HashMap<i64, &str> {
        self.districts
            .iter()
            .map(|d| (d.id, d.name.as_str()))
            .collect()
    }
}

pub fn add(state: &DistrictsState, district: &District) -> DistrictsState {
    let mut districts = state.districts.clone();
    districts.push(district.clone());
    DistrictsState { districts }
}

pub fn remove(state: &DistrictsState, id: i64) -> DistrictsState {
    let districts = state
        .districts
        .iter()
        .filter(|d| d.id != id)
        .cloned()
        .collect();
    DistrictsState { districts }
}

pub fn set(districts: Vec<District>) -> DistrictsState {
    DistrictsState { districts }
}
