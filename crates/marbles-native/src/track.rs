use marbles_core::{DragState, DragZone, TrackFrame, TrackRect, Transform};
use winit::dpi::PhysicalSize;

// Window layout (physical pixels)
pub const WINDOW_WIDTH_PX: u32 = 900;
pub const WINDOW_HEIGHT_PX: u32 = 160;
pub const TRACK_MARGIN_PX: f64 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerHit {
    Emission(usize),
    Completion,
}

/// Track bounds for a window of `size`, inset by the side margins.
#[inline]
pub fn track_rect(size: PhysicalSize<u32>) -> TrackRect {
    let width = (size.width as f64 - 2.0 * TRACK_MARGIN_PX).max(1.0);
    TrackRect::new(TRACK_MARGIN_PX, width)
}

/// Marker closest to `client_x` within `radius` pixels. Emissions win ties
/// with the completion marker so a marble parked on the boundary stays
/// grabbable.
pub fn nearest_marker(
    frame: &TrackFrame,
    transform: &Transform,
    zone: DragZone,
    client_x: f64,
    radius: f64,
) -> Option<MarkerHit> {
    let emissions = frame
        .emissions
        .iter()
        .map(|e| (MarkerHit::Emission(e.id), e.x));
    let completion = std::iter::once((MarkerHit::Completion, frame.completion));

    let mut best: Option<(MarkerHit, f64)> = None;
    for (hit, value) in emissions.chain(completion) {
        let Ok(px) = transform.value_to_client_x(zone, value) else {
            continue;
        };
        let dx = (px - client_x).abs();
        if dx > radius {
            continue;
        }
        match best {
            Some((_, best_dx)) if dx >= best_dx => {}
            _ => best = Some((hit, dx)),
        }
    }
    best.map(|(hit, _)| hit)
}

pub fn frame_title(frame: &TrackFrame) -> String {
    let xs: Vec<String> = frame.emissions.iter().map(|e| format!("{:.1}", e.x)).collect();
    let dragging = match frame.dragging {
        DragState::Idle => String::new(),
        DragState::Emission(id) => format!(" | dragging emission {}", id),
        DragState::Completion => " | dragging completion".to_string(),
    };
    format!(
        "marbles | completion {:.1} | [{}]{}",
        frame.completion,
        xs.join(", "),
        dragging
    )
}
