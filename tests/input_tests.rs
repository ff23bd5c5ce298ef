// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use marbles_core::{CompletionGrab, DragState, DragZone, EmissionGrab};

#[test]
fn parse_coord_accepts_finite_numbers_only() {
    assert_eq!(parse_coord(Some("12.5")), Some(12.5));
    assert_eq!(parse_coord(Some("  40 ")), Some(40.0));
    assert_eq!(parse_coord(Some("-3")), Some(-3.0));
    assert_eq!(parse_coord(Some("NaN")), None);
    assert_eq!(parse_coord(Some("inf")), None);
    assert_eq!(parse_coord(Some("left")), None);
    assert_eq!(parse_coord(None), None);
}

#[test]
fn parse_emission_id_rejects_negative_and_garbage() {
    assert_eq!(parse_emission_id(Some("0")), Some(0));
    assert_eq!(parse_emission_id(Some(" 7")), Some(7));
    assert_eq!(parse_emission_id(Some("-1")), None);
    assert_eq!(parse_emission_id(Some("1.5")), None);
    assert_eq!(parse_emission_id(None), None);
}

#[test]
fn zone_falls_back_to_full_track() {
    assert_eq!(parse_zone(None, None, 500.0), DragZone::new(0.0, 500.0));
    assert_eq!(
        parse_zone(Some("20"), None, 500.0),
        DragZone::new(20.0, 500.0)
    );
    assert_eq!(
        parse_zone(Some("20"), Some("480"), 500.0),
        DragZone::new(20.0, 480.0)
    );
}

#[test]
fn marker_grab_resolves_emissions_first() {
    let zone = DragZone::new(10.0, 490.0);
    assert_eq!(
        marker_grab(Some("2"), true, Some("10"), Some("490"), 500.0),
        Some(MarkerGrab::Emission(EmissionGrab { id: 2, zone }))
    );
    assert_eq!(
        marker_grab(None, true, Some("10"), Some("490"), 500.0),
        Some(MarkerGrab::Completion(CompletionGrab { zone }))
    );
    assert_eq!(marker_grab(Some("x"), false, None, None, 500.0), None);
    assert_eq!(marker_grab(None, false, None, None, 500.0), None);
}

#[test]
fn format_value_trims_trailing_zeros() {
    assert_eq!(format_value(50.0, 3), "50");
    assert_eq!(format_value(12.5, 3), "12.5");
    assert_eq!(format_value(1.0 / 3.0, 3), "0.333");
    assert_eq!(format_value(0.0, 3), "0");
    assert_eq!(format_value(-0.0001, 3), "0");
    assert_eq!(format_value(7.0, 0), "7");
}

#[test]
fn selectors_and_drag_attr() {
    assert_eq!(emission_selector(4), "[data-emission-id=\"4\"]");
    assert_eq!(drag_state_attr(DragState::Idle), None);
    assert_eq!(
        drag_state_attr(DragState::Emission(3)).as_deref(),
        Some("emission-3")
    );
    assert_eq!(
        drag_state_attr(DragState::Completion).as_deref(),
        Some("completion")
    );
}
