// Host-side tests for the web host's DOM hooks.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn selectors_match_their_attributes() {
    assert!(MARKER_SELECTOR.contains(EMISSION_ID_ATTR));
    assert!(MARKER_SELECTOR.contains(COMPLETION_ATTR));
    assert_eq!(COMPLETION_SELECTOR, format!("[{}]", COMPLETION_ATTR));
}

#[test]
fn every_gesture_end_is_a_release_source() {
    for name in ["mouseup", "touchend", "touchcancel"] {
        assert!(RELEASE_EVENTS.contains(&name), "{name} missing");
    }
    // Move and release sources never overlap
    for name in MOVE_EVENTS {
        assert!(!RELEASE_EVENTS.contains(&name));
        assert!(!GRAB_EVENTS.contains(&name));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn attribute_names_are_data_attributes() {
    for attr in [
        EMISSION_ID_ATTR,
        COMPLETION_ATTR,
        ZONE_LEFT_ATTR,
        ZONE_RIGHT_ATTR,
        MARKER_VALUE_ATTR,
        TRACK_DRAGGING_ATTR,
    ] {
        assert!(attr.starts_with("data-"), "{attr}");
    }
    assert!(VALUE_DECIMALS > 0 && VALUE_DECIMALS <= 6);
}
