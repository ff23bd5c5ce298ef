//! Pixel-to-domain mapping for the drag track.
//!
//! Pointer positions arrive in client pixels. The track's root surface is
//! `domain_width` units wide in its own coordinate space, so every client
//! offset is rescaled before being projected onto `[0, max]` and clamped to
//! the completion boundary.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("track surface has unusable width {width} (domain width {domain_width})")]
    DegenerateTrack { width: f64, domain_width: f64 },
    #[error("drag zone {left_x}..{right_x} is empty")]
    EmptyDragZone { left_x: f64, right_x: f64 },
    #[error("pointer coordinate {0} is not finite")]
    NonFiniteCoordinate(f64),
    #[error("no track surface has been stored yet")]
    NoSurface,
}

/// Client-space bounding box of the track's root surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackRect {
    pub left: f64,
    pub width: f64,
}

impl TrackRect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }
}

/// Horizontal bounds, in track units, that pointer travel maps onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragZone {
    pub left_x: f64,
    pub right_x: f64,
}

impl DragZone {
    pub fn new(left_x: f64, right_x: f64) -> Self {
        Self { left_x, right_x }
    }

    /// Zone spanning the whole track.
    pub fn full(domain_width: f64) -> Self {
        Self::new(0.0, domain_width)
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.right_x - self.left_x
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub rect: TrackRect,
    pub domain_width: f64,
    /// Value reached at the right edge of the zone (`end` or completion).
    pub max: f64,
    /// Upper clamp for every result.
    pub completion: f64,
}

impl Transform {
    /// Track units per client pixel.
    pub fn scale(&self) -> Result<f64, TransformError> {
        let width = self.rect.width;
        let scale = self.domain_width / width;
        if !width.is_finite() || width <= 0.0 || !scale.is_finite() {
            return Err(TransformError::DegenerateTrack {
                width,
                domain_width: self.domain_width,
            });
        }
        Ok(scale)
    }

    fn checked_range(zone: DragZone) -> Result<f64, TransformError> {
        let range = zone.range();
        if !range.is_finite() || range <= 0.0 {
            return Err(TransformError::EmptyDragZone {
                left_x: zone.left_x,
                right_x: zone.right_x,
            });
        }
        Ok(range)
    }

    /// Map a pointer's client x-coordinate to a domain value in `[0, completion]`.
    pub fn client_to_value(&self, zone: DragZone, client_x: f64) -> Result<f64, TransformError> {
        if !client_x.is_finite() {
            return Err(TransformError::NonFiniteCoordinate(client_x));
        }
        let scale = self.scale()?;
        let range = Self::checked_range(zone)?;

        let relative = (client_x - self.rect.left - scale * zone.left_x).max(0.0);
        let value = relative / range * self.max * scale;

        Ok(value.max(0.0).min(self.completion))
    }

    /// Client x-coordinate at which `value` sits; the inverse of
    /// [`Transform::client_to_value`] for values inside `[0, completion]`.
    pub fn value_to_client_x(&self, zone: DragZone, value: f64) -> Result<f64, TransformError> {
        if !value.is_finite() {
            return Err(TransformError::NonFiniteCoordinate(value));
        }
        let scale = self.scale()?;
        let range = Self::checked_range(zone)?;

        let origin = self.rect.left + scale * zone.left_x;
        let per_unit = self.max * scale;
        if per_unit == 0.0 {
            return Ok(origin);
        }
        Ok(origin + value / per_unit * range)
    }
}
