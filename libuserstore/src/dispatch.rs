//! Store owner and dispatcher
//!
//! A [`Store`] owns one [`UserState`] and funnels every change through
//! [`reduce`]. There is no shared or global store: each session creates its
//! own.
//!
//! Requests issued through [`Store::begin`] get a [`RequestToken`]. When the
//! external work finishes, its Success or Fail action is handed back with
//! that token through [`Store::resolve`]. Only the latest outstanding token
//! per [`Operation`] is honored, so a resolution for a request that has since
//! been superseded is dropped instead of overwriting newer state.
//!
//! Only unresolved tokens are remembered, at most one per operation, so a
//! long-lived store keeps a bounded amount of bookkeeping.
//!
//! # Example
//!
//! ```
//! use libuserstore::dispatch::{Resolution, Store};
//! use libuserstore::store::{selectors, Action};
//!
//! let mut store = Store::new();
//! let first = store.begin(Action::SearchRequest).unwrap();
//! let second = store.begin(Action::SearchRequest).unwrap();
//!
//! // The first search was superseded; its result is ignored
//! let outcome = store.resolve(first, Action::SearchSuccess { users: vec![] }).unwrap();
//! assert_eq!(outcome, Resolution::Stale);
//! assert!(selectors::loading(store.state()));
//!
//! let outcome = store.resolve(second, Action::SearchFail { error: "timeout".into() }).unwrap();
//! assert_eq!(outcome, Resolution::Applied);
//! assert_eq!(selectors::error(store.state()), "User search failed: timeout");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::store::{reduce, Action, Operation, Phase, UserState};

/// Identifies one issued request; strictly increasing per store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of handing a resolution to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The action was reduced into state
    Applied,
    /// The token was superseded or already resolved; state is unchanged
    Stale,
}

/// Owned user store
#[derive(Debug, Clone)]
pub struct Store {
    state: UserState,
    track_requests: bool,
    next_token: u64,
    /// Latest unresolved token per operation
    outstanding: BTreeMap<Operation, RequestToken>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Store with default state and request tracking enabled
    pub fn new() -> Self {
        Self::with_state(UserState::default())
    }

    /// Store starting from an existing state
    pub fn with_state(state: UserState) -> Self {
        Self {
            state,
            track_requests: true,
            next_token: 1,
            outstanding: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            track_requests: config.track_requests,
            ..Self::new()
        }
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    /// Give up ownership of the current state
    pub fn into_state(self) -> UserState {
        self.state
    }

    pub fn tracks_requests(&self) -> bool {
        self.track_requests
    }

    /// Latest unresolved token for an operation
    pub fn outstanding(&self, operation: Operation) -> Option<RequestToken> {
        self.outstanding.get(&operation).copied()
    }

    /// Apply any action directly, without token bookkeeping
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "Dispatching");
        self.apply(action);
    }

    /// Apply a Request action and issue the token its resolution must carry
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotARequest`] for any non-request action.
    pub fn begin(&mut self, action: Action) -> Result<RequestToken> {
        let operation = match action.lifecycle() {
            Some((operation, Phase::Request)) => operation,
            _ => return Err(DispatchError::NotARequest(action.name()).into()),
        };

        let token = RequestToken(self.next_token);
        self.next_token += 1;

        if let Some(superseded) = self.outstanding.insert(operation, token) {
            tracing::debug!(
                %operation,
                %superseded,
                %token,
                "Request superseded before it resolved"
            );
        }

        tracing::debug!(action = action.name(), %token, "Request issued");
        self.apply(action);
        Ok(token)
    }

    /// Apply a Success or Fail action for the request identified by `token`
    ///
    /// Returns [`Resolution::Stale`] without touching state when the token is
    /// no longer the latest outstanding one for its operation. With request
    /// tracking disabled every resolution is applied.
    ///
    /// A superseded or already resolved token is forgotten, so its operation
    /// can no longer be checked; such resolutions are reported stale rather
    /// than mismatched.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NotAResolution`] if `action` is not Success/Fail
    /// - [`DispatchError::UnknownToken`] if this store never issued `token`
    /// - [`DispatchError::OperationMismatch`] if `token` is outstanding for a
    ///   different operation than the action
    pub fn resolve(&mut self, token: RequestToken, action: Action) -> Result<Resolution> {
        let operation = match action.lifecycle() {
            Some((operation, phase)) if phase != Phase::Request => operation,
            _ => return Err(DispatchError::NotAResolution(action.name()).into()),
        };

        if token.value() == 0 || token.value() >= self.next_token {
            return Err(DispatchError::UnknownToken(token.value()).into());
        }

        let pending = self
            .outstanding
            .iter()
            .find(|(_, outstanding)| **outstanding == token)
            .map(|(pending, _)| *pending);

        match pending {
            Some(expected) if expected != operation => {
                return Err(DispatchError::OperationMismatch {
                    token: token.value(),
                    expected,
                    actual: operation,
                }
                .into());
            }
            Some(_) => {
                self.outstanding.remove(&operation);
            }
            None if self.track_requests => {
                tracing::debug!(
                    action = action.name(),
                    %token,
                    latest = ?self.outstanding(operation),
                    "Dropping stale resolution"
                );
                return Ok(Resolution::Stale);
            }
            None => {}
        }

        tracing::debug!(action = action.name(), %token, "Request resolved");
        self.apply(action);
        Ok(Resolution::Applied)
    }

    fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        debug_assert!(self.state.collection.is_consistent());
    }
}
