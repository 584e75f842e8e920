//! Pure reducer function for state transitions
//!
//! `(UserState, Action) -> UserState`
//!
//! The reducer has no side effects. It only computes new state values; the
//! asynchronous work behind each Request happens outside the store and comes
//! back as a Success or Fail action.

use super::actions::{Action, Operation};
use super::collection::EntityCollection;
use super::state::UserState;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No I/O and no logging
/// - No clock or randomness
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: UserState, action: Action) -> UserState {
    match action {
        // === Create ===
        Action::CreateRequest { user: _ } => started(state),

        Action::CreateSuccess { user } => {
            let mut collection = state.collection;
            collection.upsert_one(user);
            succeeded(UserState { collection, ..state })
        }

        Action::CreateFail { error } => failed(state, Operation::Create, &error),

        // === Search ===
        Action::SearchRequest => started(UserState {
            collection: EntityCollection::new(),
            ..state
        }),

        Action::SearchSuccess { users } => succeeded(UserState {
            collection: EntityCollection::from_users(users),
            ..state
        }),

        Action::SearchFail { error } => failed(state, Operation::Search, &error),

        // === Load by id ===
        Action::LoadByIdRequest { id } => started(UserState {
            collection: EntityCollection::new(),
            selected_id: Some(id),
            ..state
        }),

        Action::LoadByIdSuccess { user } => {
            let mut collection = state.collection;
            collection.upsert_one(user);
            succeeded(UserState { collection, ..state })
        }

        Action::LoadByIdFail { error } => failed(state, Operation::Load, &error),

        // === Update ===
        // The collection only changes once the update is confirmed
        Action::UpdateRequest { user: _ } => started(state),

        Action::UpdateSuccess { update } => {
            let mut collection = state.collection;
            collection.update_one(&update);
            succeeded(UserState { collection, ..state })
        }

        Action::UpdateFail { error } => failed(state, Operation::Update, &error),

        // === Delete by id ===
        Action::DeleteByIdRequest { id } => started(UserState {
            selected_id: Some(id),
            ..state
        }),

        Action::DeleteByIdSuccess { id } => {
            let mut collection = state.collection;
            collection.remove_one(id);
            succeeded(UserState { collection, ..state })
        }

        Action::DeleteByIdFail { error } => failed(state, Operation::Delete, &error),

        // === Local ===
        Action::SetSearchQuery { query } => UserState { query, ..state },

        Action::SelectById { id } => UserState {
            selected_id: Some(id),
            error: String::new(),
            ..state
        },

        Action::Unrecognized => state,
    }
}

fn started(state: UserState) -> UserState {
    UserState {
        loading: true,
        error: String::new(),
        ..state
    }
}

fn succeeded(state: UserState) -> UserState {
    UserState {
        loading: false,
        error: String::new(),
        ..state
    }
}

fn failed(state: UserState, operation: Operation, error: &str) -> UserState {
    UserState {
        loading: false,
        error: operation.failure_message(error),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{User, UserChanges, UserQuery, UserUpdate};

    fn state_with_error() -> UserState {
        UserState {
            error: "some error".to_string(),
            ..UserState::new()
        }
    }

    fn state_with_users(users: Vec<User>) -> UserState {
        UserState {
            collection: EntityCollection::from_users(users),
            ..state_with_error()
        }
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = state_with_error();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::SearchRequest);

        // Original value unchanged
        assert_eq!(state_clone, state);
        assert!(state_clone.has_error());

        // New state has the change
        assert!(new_state.loading);
        assert!(!new_state.has_error());
    }

    #[test]
    fn test_unrecognized_action_is_identity() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        assert_eq!(reduce(state.clone(), Action::Unrecognized), state);
    }

    #[test]
    fn test_create_request_keeps_collection() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        let new_state = reduce(
            state.clone(),
            Action::CreateRequest {
                user: User::new(2, "Sue", "Smith"),
            },
        );

        assert_eq!(new_state.collection, state.collection);
        assert!(new_state.loading);
        assert_eq!(new_state.error, "");
    }

    #[test]
    fn test_create_success_adds_user() {
        let user = User::new(5, "Joe", "Smith");
        let new_state = reduce(state_with_error(), Action::CreateSuccess { user: user.clone() });

        assert_eq!(new_state.collection.ids(), &[5]);
        assert_eq!(new_state.collection.get(5), Some(&user));
        assert!(!new_state.loading);
        assert_eq!(new_state.error, "");
    }

    #[test]
    fn test_search_request_clears_collection() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        let new_state = reduce(state, Action::SearchRequest);

        assert_eq!(
            new_state,
            UserState {
                loading: true,
                ..UserState::new()
            }
        );
    }

    #[test]
    fn test_load_by_id_request_clears_and_selects() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        let new_state = reduce(state, Action::LoadByIdRequest { id: 8675309 });

        assert_eq!(
            new_state,
            UserState {
                selected_id: Some(8675309),
                loading: true,
                ..UserState::new()
            }
        );
    }

    #[test]
    fn test_update_success_merges_changes() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        let update = UserUpdate::new(
            1,
            UserChanges {
                first_name: Some("Bob EDITED".to_string()),
                ..Default::default()
            },
        );
        let new_state = reduce(state, Action::UpdateSuccess { update });

        let user = new_state.collection.get(1).unwrap();
        assert_eq!(user.first_name, "Bob EDITED");
        assert_eq!(user.last_name, "Smith");
        assert!(!new_state.loading);
        assert_eq!(new_state.error, "");
    }

    #[test]
    fn test_delete_request_selects_without_removing() {
        let state = state_with_users(vec![User::new(1, "Bob", "Smith")]);
        let new_state = reduce(state.clone(), Action::DeleteByIdRequest { id: 1 });

        assert_eq!(new_state.selected_id, Some(1));
        assert_eq!(new_state.collection, state.collection);
        assert!(new_state.loading);
    }

    #[test]
    fn test_fail_actions_prefix_message() {
        let cases = vec![
            (Action::CreateFail { error: "e".into() }, "User create failed: e"),
            (Action::SearchFail { error: "e".into() }, "User search failed: e"),
            (Action::LoadByIdFail { error: "e".into() }, "User load failed: e"),
            (Action::UpdateFail { error: "e".into() }, "User update failed: e"),
            (Action::DeleteByIdFail { error: "e".into() }, "User delete failed: e"),
        ];

        for (action, expected) in cases {
            let state = UserState {
                loading: true,
                ..UserState::new()
            };
            let new_state = reduce(state, action);
            assert_eq!(new_state.error, expected);
            assert!(!new_state.loading);
        }
    }

    #[test]
    fn test_set_search_query_changes_only_query() {
        let state = UserState {
            loading: true,
            ..state_with_users(vec![User::new(1, "Bob", "Smith")])
        };
        let query = UserQuery {
            filter: "someFilter".to_string(),
            sort: "someSort".to_string(),
            limit: Some(20),
            page: Some(2),
            ..Default::default()
        };
        let new_state = reduce(state.clone(), Action::SetSearchQuery { query: query.clone() });

        assert_eq!(new_state, UserState { query, ..state });
    }

    #[test]
    fn test_select_by_id_clears_error_and_keeps_loading() {
        let state = UserState {
            loading: true,
            ..state_with_error()
        };
        let new_state = reduce(state, Action::SelectById { id: 3 });

        assert_eq!(new_state.selected_id, Some(3));
        assert_eq!(new_state.error, "");
        assert!(new_state.loading);
    }
}
