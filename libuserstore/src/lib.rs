//! Userstore - normalized in-memory User store
//!
//! Holds users as an ordered id list plus an id → user map, changes them only
//! through a pure reducer driven by request/success/fail actions, and exposes
//! derived read views. The asynchronous work behind each request lives
//! outside this crate.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod script;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use dispatch::{RequestToken, Resolution, Store};
pub use error::{Result, UserStoreError};
pub use store::{reduce, selectors, Action, EntityCollection, Operation, UserState};
pub use types::{SortOrder, User, UserChanges, UserId, UserQuery, UserUpdate};
