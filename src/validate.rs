//! Validation of user edit forms before they reach the store.

use crate::model::{User, UNASSIGNED_ID};
use crate::store::DistrictsState;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const REQUIRED: &str = "This field is required.";
pub const LETTERS_ONLY: &str = "Can only contain letters.";
pub const ONE_CHARACTER: &str = "Should only be one character long.";
pub const EMAIL_FORMAT: &str = "Expected format \"someone@example.com\"";
pub const UNKNOWN_DISTRICT: &str = "Unknown district.";

static ALPHA_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn alpha_regex() -> &'static Regex {
    ALPHA_RE.get_or_init(|| {
        Regex::new("(?i)^[a-z]+$")
            .unwrap_or_else(|error| panic!("alpha regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Not RFC compliant. Allows dots in the local part and up to two TLD
        // segments (example.co.uk).
        Regex::new(r"(?i)^[a-z0-9.]+@[a-z0-9]+(\.[a-z]{2,}){1,2}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_alpha(s: &str) -> bool {
    alpha_regex().is_match(s)
}

/// Raw values entered into the user form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub first_name: String,
    pub middle_initial: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
    pub district: i64,
}

impl FormValues {
    /// Prefill for editing `user`, or blank defaults for a new record.
    pub fn from_user(user: Option<&User>) -> Self {
        match user {
            Some(u) => Self {
                first_name: u.first_name.clone(),
                middle_initial: u.middle_initial.clone().unwrap_or_default(),
                last_name: u.last_name.clone(),
                email: u.email.clone(),
                active: u.active,
                district: u.district,
            },
            None => Self::default(),
        }
    }
}

/// Field-level messages; a `None` field passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_initial: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<&'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.middle_initial.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.district.is_none()
    }
}

fn check_name(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(REQUIRED)
    } else if !is_alpha(value) {
        Some(LETTERS_ONLY)
    } else {
        None
    }
}

fn check_middle_initial(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return None;
    }
    if value.chars().count() != 1 {
        Some(ONE_CHARACTER)
    } else if !is_alpha(value) {
        Some(LETTERS_ONLY)
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(REQUIRED)
    } else if !email_regex().is_match(value) {
        Some(EMAIL_FORMAT)
    } else {
        None
    }
}

fn check_district(value: i64, districts: &DistrictsState) -> Option<&'static str> {
    // Districts may not be loaded yet; only reject against a known set.
    if districts.districts.is_empty() || districts.contains(value) {
        None
    } else {
        Some(UNKNOWN_DISTRICT)
    }
}

pub fn validate(values: &FormValues, districts: &DistrictsState) -> Result<(), ValidationErrors> {
    let errors = ValidationErrors {
        first_name: check_name(&values.first_name),
        middle_initial: check_middle_initial(&values.middle_initial),
        last_name: check_name(&values.last_name),
        email: check_email(&values.email),
        district: check_district(values.district, districts),
    };
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates `values` and builds the record handed to the store.
///
/// `editing` is the record being edited; a new record gets [`UNASSIGNED_ID`].
pub fn submit(
    values: &FormValues,
    districts: &DistrictsState,
    editing: Option<&User>,
    now: DateTime<Utc>,
) -> Result<User, ValidationErrors> {
    validate(values, districts)?;

    let middle_initial = Some(values.middle_initial.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(User {
        id: editing.map(|u| u.id).unwrap_or(UNASSIGNED_ID),
        first_name: values.first_name.clone(),
        last_name: values.last_name.clone(),
        email: values.email.clone(),
        verified: false,
        middle_initial,
        created_at: now,
        district: values.district,
        active: values.active,
    })
}
