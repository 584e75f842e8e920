//! User store
//!
//! - Actions: what can happen
//! - State: what is true right now
//! - Reducer: pure function (State, Action) -> State
//! - Selectors: derived read views over state

pub mod actions;
pub mod collection;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use actions::{Action, Operation, Phase};
pub use collection::EntityCollection;
pub use reducer::reduce;
pub use state::UserState;
