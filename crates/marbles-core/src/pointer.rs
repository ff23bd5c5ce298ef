//! Merged pointer input: mouse and single-touch movement plus every way a
//! gesture can end.

use glam::DVec2;
use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Clone, Copy, Debug)]
pub struct PointerMove {
    pub client: DVec2,
    pub kind: PointerKind,
    pub at: Instant,
}

impl PointerMove {
    pub fn mouse(client_x: f64, client_y: f64, at: Instant) -> Self {
        Self {
            client: DVec2::new(client_x, client_y),
            kind: PointerKind::Mouse,
            at,
        }
    }

    /// Movement of the first active touch point; `None` when no touch is down.
    pub fn first_touch(touches: &[DVec2], at: Instant) -> Option<Self> {
        touches.first().map(|client| Self {
            client: *client,
            kind: PointerKind::Touch,
            at,
        })
    }

    #[inline]
    pub fn client_x(&self) -> f64 {
        self.client.x
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseKind {
    MouseUp,
    TouchEnd,
    TouchCancel,
}

#[derive(Clone, Copy, Debug)]
pub enum PointerEvent {
    Move(PointerMove),
    Release(ReleaseKind),
}

impl PointerEvent {
    #[inline]
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Release(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_picks_the_leading_point() {
        let at = Instant::now();
        let touches = [DVec2::new(12.0, 3.0), DVec2::new(90.0, 40.0)];
        let mv = PointerMove::first_touch(&touches, at).unwrap();
        assert_eq!(mv.client_x(), 12.0);
        assert_eq!(mv.kind, PointerKind::Touch);
    }

    #[test]
    fn no_touches_no_move() {
        assert!(PointerMove::first_touch(&[], Instant::now()).is_none());
    }

    #[test]
    fn release_detection() {
        assert!(PointerEvent::Release(ReleaseKind::TouchCancel).is_release());
        let mv = PointerMove::mouse(1.0, 2.0, Instant::now());
        assert!(!PointerEvent::Move(mv).is_release());
    }
}
