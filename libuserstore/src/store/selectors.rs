//! Derived read views over [`UserState`]
//!
//! Every view is a plain function of the state and is recomputed on each
//! call.

use super::state::UserState;
use crate::types::{User, UserId, UserQuery};

/// Users in stored order
pub fn iter_users(state: &UserState) -> impl Iterator<Item = &User> + '_ {
    state.collection.iter()
}

/// Users in stored order, materialized
pub fn all_users(state: &UserState) -> Vec<User> {
    iter_users(state).cloned().collect()
}

pub fn selected_id(state: &UserState) -> Option<UserId> {
    state.selected_id
}

pub fn loading(state: &UserState) -> bool {
    state.loading
}

pub fn error(state: &UserState) -> &str {
    &state.error
}

pub fn query(state: &UserState) -> &UserQuery {
    &state.query
}

/// The selected user, if one is selected and stored
pub fn selected_user(state: &UserState) -> Option<&User> {
    state.selected_id.and_then(|id| state.collection.get(id))
}

pub fn user_by_id(state: &UserState, id: UserId) -> Option<&User> {
    state.collection.get(id)
}

pub fn user_count(state: &UserState) -> usize {
    state.collection.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EntityCollection;

    fn sample_state() -> UserState {
        UserState {
            collection: EntityCollection::from_users(vec![
                User::new(2, "Sue", "Smith"),
                User::new(1, "Bob", "Smith"),
            ]),
            selected_id: Some(1),
            ..UserState::new()
        }
    }

    #[test]
    fn test_all_users_follows_id_order() {
        let users = all_users(&sample_state());
        let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_selected_user() {
        let state = sample_state();
        assert_eq!(selected_user(&state).map(|u| u.first_name.as_str()), Some("Bob"));

        let state = UserState {
            selected_id: Some(99),
            ..state
        };
        assert_eq!(selected_id(&state), Some(99));
        assert!(selected_user(&state).is_none());
    }

    #[test]
    fn test_empty_state_views() {
        let state = UserState::new();
        assert!(all_users(&state).is_empty());
        assert_eq!(selected_id(&state), None);
        assert!(!loading(&state));
        assert_eq!(error(&state), "");
        assert!(query(&state).is_default());
        assert_eq!(user_count(&state), 0);
        assert!(user_by_id(&state, 1).is_none());
    }
}
