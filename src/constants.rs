/// DOM hooks shared by the web host and its presenter.
///
/// Markers are plain elements inside the track; the host only reads and
/// writes these attributes, styling and geometry stay with the page.
// Marker identification
pub const EMISSION_ID_ATTR: &str = "data-emission-id";
pub const COMPLETION_ATTR: &str = "data-completion";
pub const MARKER_SELECTOR: &str = "[data-emission-id], [data-completion]";
pub const COMPLETION_SELECTOR: &str = "[data-completion]";

// Drag zone bounds in track units, on the marker or the track element
pub const ZONE_LEFT_ATTR: &str = "data-left-x";
pub const ZONE_RIGHT_ATTR: &str = "data-right-x";

// Written back by the presenter
pub const MARKER_VALUE_ATTR: &str = "data-x";
pub const TRACK_DRAGGING_ATTR: &str = "data-dragging";

// Window-scoped pointer sources, registered once per page
pub const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
pub const RELEASE_EVENTS: [&str; 3] = ["mouseup", "touchend", "touchcancel"];

// Track-scoped gesture starts
pub const GRAB_EVENTS: [&str; 2] = ["mousedown", "touchstart"];

// Presenter output precision (decimal places)
pub const VALUE_DECIMALS: usize = 3;
