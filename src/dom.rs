use crate::constants::{
    COMPLETION_ATTR, EMISSION_ID_ATTR, MARKER_SELECTOR, ZONE_LEFT_ATTR, ZONE_RIGHT_ATTR,
};
use crate::input::{marker_grab, MarkerGrab};
use marbles_core::{TrackRect, TrackSurface};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn track_element(track_id: &str) -> anyhow::Result<web::Element> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(track_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", track_id))
}

/// The track's root element as seen by the drag transform.
pub struct ElementSurface {
    element: web::Element,
}

impl ElementSurface {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl TrackSurface for ElementSurface {
    fn client_rect(&self) -> TrackRect {
        let rect = self.element.get_bounding_client_rect();
        TrackRect::new(rect.left(), rect.width())
    }
}

/// Marker under a pointer-down inside `track`, if any. Zone bounds on the
/// marker take precedence over bounds declared on the track itself.
pub fn grab_from_event(ev: &web::Event, track: &web::Element, domain_width: f64) -> Option<MarkerGrab> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let marker = target.closest(MARKER_SELECTOR).ok()??;
    if !track.contains(Some(marker.as_ref())) {
        return None;
    }
    let attr = |name: &str| marker.get_attribute(name).or_else(|| track.get_attribute(name));
    let left = attr(ZONE_LEFT_ATTR);
    let right = attr(ZONE_RIGHT_ATTR);
    marker_grab(
        marker.get_attribute(EMISSION_ID_ATTR).as_deref(),
        marker.has_attribute(COMPLETION_ATTR),
        left.as_deref(),
        right.as_deref(),
        domain_width,
    )
}
