//! Core types for the user store

use serde::{Deserialize, Serialize};

/// Identifier of a stored user
pub type UserId = u64;

/// A single User record
///
/// The user name is derived from the first and last name when it is missing
/// or empty at construction, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserRecord")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

/// Wire shape of a user before the user name is derived
#[derive(Deserialize)]
struct UserRecord {
    id: UserId,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    user_name: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let user = User::new(record.id, record.first_name, record.last_name);
        match record.user_name {
            Some(name) if !name.is_empty() => user.with_user_name(name),
            _ => user,
        }
    }
}

impl User {
    /// Create a user, deriving `user_name` as `first.last`
    pub fn new(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let user_name = derive_user_name(&first_name, &last_name);
        Self {
            id,
            first_name,
            last_name,
            user_name,
        }
    }

    /// Override the derived user name
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Apply a partial update, overwriting only the fields present in `changes`
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(first_name) = &changes.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(user_name) = &changes.user_name {
            self.user_name = user_name.clone();
        }
    }

    /// Build a user from a partial update when no prior record exists
    pub fn from_changes(id: UserId, changes: &UserChanges) -> Self {
        let user = User::new(
            id,
            changes.first_name.clone().unwrap_or_default(),
            changes.last_name.clone().unwrap_or_default(),
        );
        match &changes.user_name {
            Some(name) if !name.is_empty() => user.with_user_name(name.clone()),
            _ => user,
        }
    }
}

fn derive_user_name(first_name: &str, last_name: &str) -> String {
    format!("{}.{}", first_name, last_name)
}

/// Partial set of user fields carried by an update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<&User> for UserChanges {
    fn from(user: &User) -> Self {
        Self {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            user_name: Some(user.user_name.clone()),
        }
    }
}

/// Update of an existing user: target id plus the changed fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub id: UserId,
    #[serde(default)]
    pub changes: UserChanges,
}

impl UserUpdate {
    pub fn new(id: UserId, changes: UserChanges) -> Self {
        Self { id, changes }
    }
}

/// Sort direction of a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: '{}'. Valid options: asc, desc", s)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Search, filter, sort and pagination descriptor
///
/// The store keeps this verbatim; interpreting it is up to whoever performs
/// the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserQuery {
    pub filter: String,
    pub sort: String,
    pub order: SortOrder,
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

impl UserQuery {
    /// True when no search has been described
    pub fn is_default(&self) -> bool {
        self == &UserQuery::default()
    }
}
