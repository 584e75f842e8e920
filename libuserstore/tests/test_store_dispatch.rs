//! Test the owned store: request tokens, stale resolutions and scripts

use libuserstore::fixtures::{self, user};
use libuserstore::script::{self, RunSummary, Step};
use libuserstore::{
    selectors, Action, Operation, RequestToken, Resolution, Store, UserChanges, UserUpdate,
};

#[test]
fn test_full_crud_cycle() {
    let mut store = Store::new();

    let search = store.begin(Action::SearchRequest).unwrap();
    assert!(selectors::loading(store.state()));
    store
        .resolve(search, Action::SearchSuccess { users: fixtures::users() })
        .unwrap();

    let create = store.begin(Action::CreateRequest { user: user(4, "Joe") }).unwrap();
    store
        .resolve(create, Action::CreateSuccess { user: user(4, "Joe") })
        .unwrap();

    let update = store.begin(Action::UpdateRequest { user: user(4, "Joseph") }).unwrap();
    store
        .resolve(
            update,
            Action::UpdateSuccess {
                update: UserUpdate::new(
                    4,
                    UserChanges {
                        first_name: Some("Joseph".to_string()),
                        ..Default::default()
                    },
                ),
            },
        )
        .unwrap();

    let delete = store.begin(Action::DeleteByIdRequest { id: 2 }).unwrap();
    store.resolve(delete, Action::DeleteByIdSuccess { id: 2 }).unwrap();

    let state = store.state();
    let names: Vec<&str> = selectors::iter_users(state)
        .map(|u| u.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob", "Mary", "Joseph"]);
    assert_eq!(selectors::selected_id(state), Some(2));
    assert!(!selectors::loading(state));
    assert_eq!(selectors::error(state), "");
    for operation in Operation::ALL {
        assert!(store.outstanding(operation).is_none());
    }
}

#[test]
fn test_stale_failure_does_not_clobber_newer_success() {
    let mut store = Store::new();

    let first = store.begin(Action::SearchRequest).unwrap();
    let second = store.begin(Action::SearchRequest).unwrap();

    assert_eq!(
        store
            .resolve(second, Action::SearchSuccess { users: fixtures::users() })
            .unwrap(),
        Resolution::Applied
    );
    assert_eq!(
        store
            .resolve(first, Action::SearchFail { error: "timeout".to_string() })
            .unwrap(),
        Resolution::Stale
    );

    assert_eq!(selectors::error(store.state()), "");
    assert_eq!(selectors::user_count(store.state()), 3);
}

#[test]
fn test_store_with_existing_state() {
    let mut store = Store::with_state(fixtures::users_state());
    store.dispatch(Action::SelectById { id: 3 });

    assert_eq!(
        selectors::selected_user(store.state()).map(|u| u.first_name.as_str()),
        Some("Mary")
    );
}

#[test]
fn test_script_round_trip_through_store() {
    let script_text = r#"
{"type": "load_by_id_request", "id": 2}
{"token": 1, "action": {"type": "load_by_id_fail", "error": "not found"}}
{"type": "set_search_query", "query": {"filter": "sue", "limit": 5}}
{"type": "something_else"}
"#;
    let steps = script::parse(script_text).unwrap();
    assert_eq!(steps.len(), 4);
    assert!(matches!(steps[1], Step::Resolve { token, .. } if token == RequestToken::new(1)));

    let mut store = Store::new();
    let summary = script::run(&mut store, steps).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            steps: 4,
            requests: 1,
            applied: 3,
            stale: 0,
        }
    );
    let state = store.state();
    assert_eq!(selectors::error(state), "User load failed: not found");
    assert_eq!(selectors::selected_id(state), Some(2));
    assert_eq!(selectors::query(state).filter, "sue");
    assert_eq!(selectors::query(state).limit, Some(5));
}
