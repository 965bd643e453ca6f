// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use budget_visualizer::application::{Action, Session, handle};
use budget_visualizer::domain::{Cents, Ledger};

/// Helper to build a ledger from (name, cents) pairs
pub fn ledger_with(entries: &[(&str, Cents)]) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for (name, cost) in entries {
        ledger.add(name, *cost)?;
    }
    Ok(ledger)
}

/// Test fixture: the two streaming subscriptions used throughout the docs
pub fn streaming_ledger() -> Result<Ledger> {
    ledger_with(&[("Netflix", 1549), ("Spotify", 999)])
}

/// Helper to drive a session through a list of actions, failing on the first rejection
pub fn run_actions(actions: Vec<Action>) -> Result<Session> {
    let mut session = Session::new();
    for action in actions {
        let (next, outcome) = handle(session, action);
        outcome?;
        session = next;
    }
    Ok(session)
}

pub fn add(name: &str, cost_cents: Cents) -> Action {
    Action::Add {
        name: name.to_string(),
        cost_cents,
    }
}
