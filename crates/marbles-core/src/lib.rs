//! Headless interaction core for a draggable marble-diagram track.
//!
//! Nothing in this crate touches a platform API. Hosts feed pointer input
//! into a [`PointerDispatcher`], hand the view a [`TrackSurface`] and draw
//! whatever [`DraggableView::render`] reports.

pub mod constants;
pub mod dispatcher;
pub mod emission;
pub mod pointer;
pub mod throttle;
pub mod transform;
pub mod view;

pub use constants::*;
pub use dispatcher::*;
pub use emission::*;
pub use pointer::*;
pub use throttle::*;
pub use transform::*;
pub use view::*;
