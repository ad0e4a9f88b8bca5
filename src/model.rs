use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity carried by a record that has not been stored yet.
pub const UNASSIGNED_ID: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub verified: bool,
    #[serde(default)]
    pub middle_initial: Option<String>,
    pub created_at: DateTime<Utc>,
    pub district: i64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    FirstName,
    LastName,
    Email,
    Verified,
    MiddleInitial,
    CreatedAt,
    District,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[cfg(test)]
pub(crate) fn user(id: i64) -> User {
    use chrono::TimeZone;

    User {
        id,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test.user@example.com".to_string(),
        verified: false,
        middle_initial: None,
        created_at: Utc
            .with_ymd_and_hms(2020, 6, 18, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        district: 1,
        active: true,
    }
}
