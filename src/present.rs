use crate::constants::{COMPLETION_SELECTOR, MARKER_VALUE_ATTR, TRACK_DRAGGING_ATTR, VALUE_DECIMALS};
use crate::input::{drag_state_attr, emission_selector, format_value};
use marbles_core::TrackFrame;
use web_sys as web;

/// Mirror a frame onto the marker elements; the page styles them from the
/// `data-x` and `data-dragging` attributes.
pub fn sync_frame(track: &web::Element, frame: &TrackFrame) {
    for emission in &frame.emissions {
        if let Ok(Some(marker)) = track.query_selector(&emission_selector(emission.id)) {
            set_attr(&marker, MARKER_VALUE_ATTR, &format_value(emission.x, VALUE_DECIMALS));
        }
    }
    if let Ok(Some(marker)) = track.query_selector(COMPLETION_SELECTOR) {
        set_attr(&marker, MARKER_VALUE_ATTR, &format_value(frame.completion, VALUE_DECIMALS));
    }
    match drag_state_attr(frame.dragging) {
        Some(value) => set_attr(track, TRACK_DRAGGING_ATTR, &value),
        None => {
            _ = track.remove_attribute(TRACK_DRAGGING_ATTR);
        }
    }
}

#[inline]
fn set_attr(el: &web::Element, name: &str, value: &str) {
    if let Err(e) = el.set_attribute(name, value) {
        log::error!("[present] {} attribute error: {:?}", name, e);
    }
}
