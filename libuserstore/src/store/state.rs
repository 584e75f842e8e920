//! User store state
//!
//! Immutable state structure. All state transitions happen through the
//! reducer (see `reducer.rs`).

use serde::{Deserialize, Serialize};

use super::collection::EntityCollection;
use crate::types::{UserId, UserQuery};

/// Root state of the user store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserState {
    /// Normalized users
    pub collection: EntityCollection,

    /// Currently selected user, which need not be stored
    pub selected_id: Option<UserId>,

    /// A request issued through this store is outstanding
    pub loading: bool,

    /// Last failure message, empty when none is pending
    pub error: String,

    /// Last search descriptor
    pub query: UserQuery,
}

impl UserState {
    /// Create state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}
