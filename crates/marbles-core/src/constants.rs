use std::time::Duration;

// Shared interaction tuning constants used by both web and native hosts.

// Gesture pacing
pub const MAX_DRAG_UPDATES_PER_SEC: u32 = 60;
pub const DRAG_THROTTLE_INTERVAL: Duration =
    Duration::from_nanos(1_000_000_000 / MAX_DRAG_UPDATES_PER_SEC as u64); // ~16.67 ms

// Track defaults (domain units)
pub const DEFAULT_DOMAIN_WIDTH: f64 = 500.0; // rendered track width in viewBox units
pub const DEFAULT_COMPLETION: f64 = 80.0;
pub const DEFAULT_EMISSION_XS: [f64; 3] = [10.0, 35.0, 60.0];

// Marker hit-testing (client pixels)
pub const HIT_RADIUS_PX: f64 = 12.0;
