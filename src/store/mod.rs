//! Explicit state container for the admin panel.
//!
//! Each slice is owned by a module of pure reducers. The store only ever
//! changes through [`AdminStore::dispatch`], which routes an [`Action`] to
//! the reducer for its type and reassigns the returned slice.

pub mod districts;
pub mod filter;
pub mod sort;
pub mod users;

use crate::model::{District, User};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use districts::DistrictsState;
pub use filter::{ActiveOnlyFilter, DistrictFilter, FilterState};
pub use sort::{SortPatch, SortState};
pub use users::UsersState;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "users/add")]
    UsersAdd(User),
    #[serde(rename = "users/modify")]
    UsersModify(User),
    #[serde(rename = "users/remove")]
    UsersRemove(i64),
    #[serde(rename = "users/set")]
    UsersSet(Vec<User>),
    #[serde(rename = "districts/add")]
    DistrictsAdd(District),
    #[serde(rename = "districts/remove")]
    DistrictsRemove(i64),
    #[serde(rename = "districts/set")]
    DistrictsSet(Vec<District>),
    #[serde(rename = "filter/district")]
    FilterDistrict(DistrictFilter),
    #[serde(rename = "filter/activeOnly")]
    FilterActiveOnly(ActiveOnlyFilter),
    #[serde(rename = "filter/reset")]
    FilterReset,
    #[serde(rename = "sort/sort")]
    Sort(SortPatch),
    #[serde(rename = "sort/reset")]
    SortReset,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UsersAdd(_) => "users/add",
            Self::UsersModify(_) => "users/modify",
            Self::UsersRemove(_) => "users/remove",
            Self::UsersSet(_) => "users/set",
            Self::DistrictsAdd(_) => "districts/add",
            Self::DistrictsRemove(_) => "districts/remove",
            Self::DistrictsSet(_) => "districts/set",
            Self::FilterDistrict(_) => "filter/district",
            Self::FilterActiveOnly(_) => "filter/activeOnly",
            Self::FilterReset => "filter/reset",
            Self::Sort(_) => "sort/sort",
            Self::SortReset => "sort/reset",
        }
    }
}

/// Read-only snapshot of every slice.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub users: &'a UsersState,
    pub districts: &'a DistrictsState,
    pub filter: &'a FilterState,
    pub sort: &'a SortState,
}

#[derive(Debug, Default)]
pub struct AdminStore {
    users: UsersState,
    districts: DistrictsState,
    filter: FilterState,
    sort: SortState,
}

impl AdminStore {
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.kind(), "dispatch");
        match action {
            Action::UsersAdd(user) => self.users = users::add(&self.users, &user),
            Action::UsersModify(user) => self.users = users::modify(&self.users, &user),
            Action::UsersRemove(id) => self.users = users::remove(&self.users, id),
            Action::UsersSet(list) => self.users = users::set(list),
            Action::DistrictsAdd(district) => {
                self.districts = districts::add(&self.districts, &district)
            }
            Action::DistrictsRemove(id) => self.districts = districts::remove(&self.districts, id),
            Action::DistrictsSet(list) => self.districts = districts::set(list),
            Action::FilterDistrict(f) => self.filter = filter::filter_district(&self.filter, f),
            Action::FilterActiveOnly(f) => {
                self.filter = filter::filter_active_only(&self.filter, f)
            }
            Action::FilterReset => self.filter = filter::reset(),
            Action::Sort(patch) => self.sort = sort::sort(&self.sort, patch),
            Action::SortReset => self.sort = sort::reset(),
        }
    }

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn districts(&self) -> &DistrictsState {
        &self.districts
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn find_user(&self, id: i64) -> Option<&User> {
        self.users.users.iter().find(|u| u.id == id)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            users: &self.users,
            districts: &self.districts,
            filter: &self.filter,
            sort: &self.sort,
        }
    }
}
