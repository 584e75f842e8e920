//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. Each asynchronous
//! operation is described by a Request action, issued when the work starts,
//! and a matching Success or Fail action issued once the work completes
//! outside the store.

use serde::{Deserialize, Serialize};

use crate::types::{User, UserId, UserQuery, UserUpdate};

/// Actions that trigger state transitions
///
/// Actions are immutable data describing what happened. The reducer
/// (see `reducer.rs`) is responsible for applying them to state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // === Create ===
    CreateRequest { user: User },
    CreateSuccess { user: User },
    CreateFail { error: String },

    // === Search ===
    SearchRequest,
    SearchSuccess { users: Vec<User> },
    SearchFail { error: String },

    // === Load by id ===
    LoadByIdRequest { id: UserId },
    LoadByIdSuccess { user: User },
    LoadByIdFail { error: String },

    // === Update ===
    UpdateRequest { user: User },
    UpdateSuccess { update: UserUpdate },
    UpdateFail { error: String },

    // === Delete by id ===
    DeleteByIdRequest { id: UserId },
    DeleteByIdSuccess { id: UserId },
    DeleteByIdFail { error: String },

    // === Local ===
    SetSearchQuery { query: UserQuery },
    SelectById { id: UserId },

    /// Any action tag this store does not know; leaves state untouched
    #[serde(other)]
    Unrecognized,
}

/// Asynchronous operation an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Search,
    Load,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Search,
        Operation::Load,
        Operation::Update,
        Operation::Delete,
    ];

    /// Prefix the store puts in front of a failure message
    pub fn failure_message(&self, error: &str) -> String {
        format!("User {} failed: {}", self, error)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Search => write!(f, "search"),
            Operation::Load => write!(f, "load"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Where an action sits in the request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Request,
    Success,
    Fail,
}

impl Action {
    /// Operation and phase for request/resolution actions, `None` for local ones
    pub fn lifecycle(&self) -> Option<(Operation, Phase)> {
        let lifecycle = match self {
            Action::CreateRequest { .. } => (Operation::Create, Phase::Request),
            Action::CreateSuccess { .. } => (Operation::Create, Phase::Success),
            Action::CreateFail { .. } => (Operation::Create, Phase::Fail),
            Action::SearchRequest => (Operation::Search, Phase::Request),
            Action::SearchSuccess { .. } => (Operation::Search, Phase::Success),
            Action::SearchFail { .. } => (Operation::Search, Phase::Fail),
            Action::LoadByIdRequest { .. } => (Operation::Load, Phase::Request),
            Action::LoadByIdSuccess { .. } => (Operation::Load, Phase::Success),
            Action::LoadByIdFail { .. } => (Operation::Load, Phase::Fail),
            Action::UpdateRequest { .. } => (Operation::Update, Phase::Request),
            Action::UpdateSuccess { .. } => (Operation::Update, Phase::Success),
            Action::UpdateFail { .. } => (Operation::Update, Phase::Fail),
            Action::DeleteByIdRequest { .. } => (Operation::Delete, Phase::Request),
            Action::DeleteByIdSuccess { .. } => (Operation::Delete, Phase::Success),
            Action::DeleteByIdFail { .. } => (Operation::Delete, Phase::Fail),
            Action::SetSearchQuery { .. } | Action::SelectById { .. } | Action::Unrecognized => {
                return None
            }
        };
        Some(lifecycle)
    }

    pub fn operation(&self) -> Option<Operation> {
        self.lifecycle().map(|(operation, _)| operation)
    }

    pub fn is_request(&self) -> bool {
        matches!(self.lifecycle(), Some((_, Phase::Request)))
    }

    /// Success or Fail action
    pub fn is_resolution(&self) -> bool {
        matches!(self.lifecycle(), Some((_, Phase::Success | Phase::Fail)))
    }

    /// Short tag used in logs, matching the serialized `type`
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateRequest { .. } => "create_request",
            Action::CreateSuccess { .. } => "create_success",
            Action::CreateFail { .. } => "create_fail",
            Action::SearchRequest => "search_request",
            Action::SearchSuccess { .. } => "search_success",
            Action::SearchFail { .. } => "search_fail",
            Action::LoadByIdRequest { .. } => "load_by_id_request",
            Action::LoadByIdSuccess { .. } => "load_by_id_success",
            Action::LoadByIdFail { .. } => "load_by_id_fail",
            Action::UpdateRequest { .. } => "update_request",
            Action::UpdateSuccess { .. } => "update_success",
            Action::UpdateFail { .. } => "update_fail",
            Action::DeleteByIdRequest { .. } => "delete_by_id_request",
            Action::DeleteByIdSuccess { .. } => "delete_by_id_success",
            Action::DeleteByIdFail { .. } => "delete_by_id_fail",
            Action::SetSearchQuery { .. } => "set_search_query",
            Action::SelectById { .. } => "select_by_id",
            Action::Unrecognized => "unrecognized",
        }
    }
}
