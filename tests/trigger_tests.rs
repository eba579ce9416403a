// Host-side tests for the playback trigger bookkeeping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod trigger {
    include!("../src/trigger.rs");
}

use trigger::*;

#[derive(Debug, PartialEq)]
struct Source(u32);

#[test]
fn first_attempt_attaches_fresh() {
    let mut gate: StartGate<Source> = StartGate::new();
    assert_eq!(gate.begin(), Ok(None));
    gate.finish();
    assert_eq!(gate.begin(), Ok(None));
}

#[test]
fn overlapping_attempts_are_refused() {
    let mut gate: StartGate<Source> = StartGate::new();
    assert_eq!(gate.begin(), Ok(None));
    assert_eq!(gate.begin(), Err(StartBusy));
    gate.abort();
    assert_eq!(gate.begin(), Ok(None));
}

#[test]
fn refused_autoplay_reuses_source_on_click() {
    let mut gate = StartGate::new();
    // autoplay: attach, play refused
    assert_eq!(gate.begin(), Ok(None));
    gate.park(Source(1));
    // the refusal wires the start button
    assert!(gate.claim_click_listener());

    // click: the same source comes back instead of a second attach
    assert_eq!(gate.begin(), Ok(Some(Source(1))));
    gate.finish();
    assert_eq!(gate.begin(), Ok(None));
}

#[test]
fn click_listener_is_wired_once() {
    let mut gate: StartGate<Source> = StartGate::new();
    assert!(gate.claim_click_listener());
    assert!(!gate.claim_click_listener());
    gate.park(Source(2));
    assert!(!gate.claim_click_listener());
}
