use marbles_core::{CompletionGrab, DragState, DragZone, EmissionGrab};

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerGrab {
    Emission(EmissionGrab),
    Completion(CompletionGrab),
}

// ---------------- Attribute parsing ----------------
#[inline]
pub fn parse_coord(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[inline]
pub fn parse_emission_id(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok()
}

/// Zone from marker attributes; missing bounds fall back to the full track.
#[inline]
pub fn parse_zone(left: Option<&str>, right: Option<&str>, domain_width: f64) -> DragZone {
    DragZone::new(
        parse_coord(left).unwrap_or(0.0),
        parse_coord(right).unwrap_or(domain_width),
    )
}

/// Resolve a pointer-down from the attributes of the marker it hit.
/// Emission ids win over the completion flag when both are present.
pub fn marker_grab(
    emission_id: Option<&str>,
    is_completion: bool,
    left: Option<&str>,
    right: Option<&str>,
    domain_width: f64,
) -> Option<MarkerGrab> {
    let zone = parse_zone(left, right, domain_width);
    match parse_emission_id(emission_id) {
        Some(id) => Some(MarkerGrab::Emission(EmissionGrab { id, zone })),
        None if is_completion => Some(MarkerGrab::Completion(CompletionGrab { zone })),
        None => None,
    }
}

// ---------------- Presenter formatting ----------------
#[inline]
pub fn emission_selector(id: usize) -> String {
    format!("[data-emission-id=\"{}\"]", id)
}

/// Compact decimal for attribute output: `50`, `12.5`, `0.333`.
pub fn format_value(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[inline]
pub fn drag_state_attr(state: DragState) -> Option<String> {
    match state {
        DragState::Idle => None,
        DragState::Emission(id) => Some(format!("emission-{}", id)),
        DragState::Completion => Some("completion".to_string()),
    }
}
