use crate::model::{SortColumn, SortDirection, User};
use crate::store::{DistrictsState, FilterState, SortState};
use chrono::{DateTime, Utc};
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;
use std::cmp::Ordering;

/// Filtered and sorted projection of the user collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// Records left after filtering, in display order.
    pub items: Vec<User>,
    /// Collection size before filtering.
    pub total: usize,
}

/// A view item decorated for the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow<'a> {
    #[serde(flatten)]
    pub user: &'a User,
    pub district_name: Option<&'a str>,
    pub created_label: String,
}

pub fn view(users: &[User], filter: &FilterState, sort: &SortState) -> UserView {
    let total = users.len();

    let mut items: Vec<User> = users
        .iter()
        .filter(|u| matches_filter(u, filter))
        .cloned()
        .collect();

    if sort.enabled {
        let collator = text_collator();
        items.sort_by(|a, b| {
            // Swap operands instead of reversing the result so every column
            // only has to describe ascending order.
            let (left, right) = match sort.direction {
                SortDirection::Asc => (a, b),
                SortDirection::Desc => (b, a),
            };
            compare_by(collator.as_ref(), sort.column, left, right)
        });
    }

    UserView { items, total }
}

fn matches_filter(user: &User, filter: &FilterState) -> bool {
    if filter.active_only.enabled && !user.active {
        return false;
    }
    if filter.district.enabled && user.district != filter.district.value {
        return false;
    }
    true
}

fn compare_by(
    collator: Option<&Collator>,
    column: SortColumn,
    left: &User,
    right: &User,
) -> Ordering {
    match column {
        SortColumn::Id => left.id.cmp(&right.id),
        SortColumn::District => left.district.cmp(&right.district),
        SortColumn::FirstName => compare_text(collator, &left.first_name, &right.first_name),
        SortColumn::LastName => compare_text(collator, &left.last_name, &right.last_name),
        SortColumn::Email => compare_text(collator, &left.email, &right.email),
        SortColumn::MiddleInitial => compare_text(
            collator,
            left.middle_initial.as_deref().unwrap_or(""),
            right.middle_initial.as_deref().unwrap_or(""),
        ),
        SortColumn::Verified => u8::from(left.verified).cmp(&u8::from(right.verified)),
        SortColumn::Active => u8::from(left.active).cmp(&u8::from(right.active)),
        SortColumn::CreatedAt => left.created_at.cmp(&right.created_at),
    }
}

/// Root-locale collation at secondary strength: accents count, case does not.
fn text_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options).ok()
}

fn compare_text(collator: Option<&Collator>, left: &str, right: &str) -> Ordering {
    match collator {
        Some(c) => c.compare(left, right),
        // Only reached if the built-in collation data fails to load.
        None => left.to_lowercase().cmp(&right.to_lowercase()),
    }
}

/// Decorates view items with their district name and creation label.
pub fn display_rows<'a>(view: &'a UserView, districts: &'a DistrictsState) -> Vec<UserRow<'a>> {
    let names = districts.names();
    view.items
        .iter()
        .map(|user| UserRow {
            user,
            district_name: names.get(&user.district).copied(),
            created_label: format_date(&user.created_at),
        })
        .collect()
}

/// Formats as "Month DD, YYYY", e.g. "June 18, 2020".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}
