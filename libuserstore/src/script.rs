//! Action scripts
//!
//! A script is JSON lines, one step per line. Blank lines and lines starting
//! with `#` are skipped. A step is either a bare action:
//!
//! ```text
//! {"type": "search_request"}
//! ```
//!
//! or a resolution addressed to the request that was issued token `N`:
//!
//! ```text
//! {"token": 1, "action": {"type": "search_fail", "error": "timeout"}}
//! ```
//!
//! Tokens are handed out in script order starting at 1, one per Request
//! step.

use serde::{Deserialize, Serialize};

use crate::dispatch::{RequestToken, Resolution, Store};
use crate::error::{Result, UserStoreError};
use crate::store::Action;

/// One line of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Resolve { token: RequestToken, action: Action },
    Action(Action),
}

/// Counters gathered while running a script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub requests: usize,
    pub applied: usize,
    pub stale: usize,
}

/// Parse a script, reporting the 1-based line number of the first bad line
pub fn parse(input: &str) -> Result<Vec<Step>> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str::<Step>(line).map_err(|e| {
                UserStoreError::InvalidInput(format!("line {}: {}", number, e))
            })
        })
        .collect()
}

/// Feed steps into a store
///
/// Request actions go through [`Store::begin`], token-addressed steps through
/// [`Store::resolve`], everything else through [`Store::dispatch`].
pub fn run(store: &mut Store, steps: impl IntoIterator<Item = Step>) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for step in steps {
        summary.steps += 1;
        match step {
            Step::Resolve { token, action } => match store.resolve(token, action)? {
                Resolution::Applied => summary.applied += 1,
                Resolution::Stale => summary.stale += 1,
            },
            Step::Action(action) if action.is_request() => {
                store.begin(action)?;
                summary.requests += 1;
            }
            Step::Action(action) => {
                store.dispatch(action);
                summary.applied += 1;
            }
        }
    }

    Ok(summary)
}
