use crate::model::{User, UNASSIGNED_ID};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsersState {
    pub users: Vec<User>,
}

/// One past the largest identity, with an empty collection counting as 0.
///
/// `None` once the collection already holds `i64::MAX`.
pub fn next_id(users: &[User]) -> Option<i64> {
    users.iter().map(|u| u.id).fold(0, i64::max).checked_add(1)
}

/// Appends `user`, assigning a fresh identity first when it carries the sentinel.
///
/// A non-sentinel identity is appended as given; duplicates are not rejected.
/// When no identity is left to assign the state is returned unchanged.
pub fn add(state: &UsersState, user: &User) -> UsersState {
    // Assigned here rather than by the caller so that a filtered view can
    // never hide the current maximum.
    let mut record = user.clone();
    if record.id == UNASSIGNED_ID {
        let Some(id) = next_id(&state.users) else {
            return state.clone();
        };
        record.id = id;
    }

    let mut users = state.users.clone();
    users.push(record);
    UsersState { users }
}

pub fn modify(state: &UsersState, user: &User) -> UsersState {
    let users = state
        .users
        .iter()
        .map(|u| if u.id == user.id { user.clone() } else { u.clone() })
        .collect();
    UsersState { users }
}

pub fn remove(state: &UsersState, id: i64) -> UsersState {
    let users = state.users.iter().filter(|u| u.id != id).cloned().collect();
    UsersState { users }
}

pub fn set(users: Vec<User>) -> UsersState {
    UsersState { users }
}
