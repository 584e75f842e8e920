//! Test fixtures
//!
//! Factories for users and store states used by unit and integration tests.
//! Blank names fall back to `firstName` / `lastName`, but the user name is
//! derived from the names as given, so `user(2, "Sue")` is `Sue.`.

use crate::store::{EntityCollection, UserState};
use crate::types::{User, UserId};

/// A user with the given id and first name
pub fn user(id: UserId, first_name: &str) -> User {
    named_user(id, first_name, "")
}

/// A user with the given id and names; blank names get placeholders
pub fn named_user(id: UserId, first_name: &str, last_name: &str) -> User {
    let user_name = format!("{}.{}", first_name, last_name);
    User::new(
        id,
        or_placeholder(first_name, "firstName"),
        or_placeholder(last_name, "lastName"),
    )
    .with_user_name(user_name)
}

fn or_placeholder<'a>(name: &'a str, placeholder: &'a str) -> &'a str {
    if name.is_empty() {
        placeholder
    } else {
        name
    }
}

/// Bob, Sue and Mary with ids 1, 2 and 3
pub fn users() -> Vec<User> {
    vec![user(1, "Bob"), user(2, "Sue"), user(3, "Mary")]
}

/// Default state holding exactly `users`, in order
pub fn user_state_with(users: Vec<User>) -> UserState {
    UserState {
        collection: EntityCollection::from_users(users),
        ..UserState::default()
    }
}

/// Default state holding [`users`]
pub fn users_state() -> UserState {
    user_state_with(users())
}
