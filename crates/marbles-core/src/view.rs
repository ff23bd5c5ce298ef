//! `DraggableView`: local interaction state for one marble track.
//!
//! The view owns the emissions and completion it was seeded with, turns
//! pointer-downs on markers into drag gestures on the shared
//! [`PointerDispatcher`] and reports every change to the owner through the
//! optional callbacks. Drawing is left to whoever consumes [`TrackFrame`].

use crate::constants::DRAG_THROTTLE_INTERVAL;
use crate::dispatcher::{Flow, PointerDispatcher, SubscriptionId};
use crate::emission::{stamp_emissions, with_x, Emission, EmissionInput};
use crate::pointer::PointerEvent;
use crate::throttle::Throttle;
use crate::transform::{DragZone, TrackRect, Transform, TransformError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The track's root drawable, queried for its client bounding box on every
/// handled move.
pub trait TrackSurface {
    fn client_rect(&self) -> TrackRect;
}

impl TrackSurface for TrackRect {
    fn client_rect(&self) -> TrackRect {
        *self
    }
}

impl TrackSurface for std::cell::Cell<TrackRect> {
    fn client_rect(&self) -> TrackRect {
        self.get()
    }
}

pub type EmissionsCallback = Rc<dyn Fn(&[Emission])>;
pub type CompletionCallback = Rc<dyn Fn(f64)>;
pub type RenderHook = Rc<dyn Fn(&TrackFrame)>;

#[derive(Clone)]
pub struct DraggableProps {
    pub emissions: Rc<[EmissionInput]>,
    pub completion: f64,
    /// Explicit upper bound for scaling; falls back to `completion`.
    pub end: Option<f64>,
    /// Domain width of the rendered track.
    pub width: f64,
    pub on_change_emissions: Option<EmissionsCallback>,
    pub on_change_completion: Option<CompletionCallback>,
}

impl DraggableProps {
    pub fn new(emissions: impl Into<Rc<[EmissionInput]>>, completion: f64, width: f64) -> Self {
        Self {
            emissions: emissions.into(),
            completion,
            end: None,
            width,
            on_change_emissions: None,
            on_change_completion: None,
        }
    }

    pub fn with_end(mut self, end: Option<f64>) -> Self {
        self.end = end;
        self
    }

    pub fn with_on_change_emissions(mut self, callback: impl Fn(&[Emission]) + 'static) -> Self {
        self.on_change_emissions = Some(Rc::new(callback));
        self
    }

    pub fn with_on_change_completion(mut self, callback: impl Fn(f64) + 'static) -> Self {
        self.on_change_completion = Some(Rc::new(callback));
        self
    }

    #[inline]
    pub fn max_value(&self) -> f64 {
        self.end.unwrap_or(self.completion)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Emission(usize),
    Completion,
}

impl DragState {
    #[inline]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    #[inline]
    pub fn emission_id(&self) -> Option<usize> {
        match self {
            DragState::Emission(id) => Some(*id),
            _ => None,
        }
    }
}

/// Pointer-down on an emission marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionGrab {
    pub id: usize,
    pub zone: DragZone,
}

/// Pointer-down on the completion marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionGrab {
    pub zone: DragZone,
}

/// Everything a presenter needs to draw the track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackFrame {
    pub emissions: Vec<Emission>,
    pub completion: f64,
    pub end: Option<f64>,
    pub width: f64,
    pub dragging: DragState,
}

#[derive(Clone, Copy, Debug)]
struct Gesture {
    serial: u64,
    subscription: SubscriptionId,
}

struct ViewState {
    props: DraggableProps,
    emissions: Vec<Emission>,
    completion: f64,
    dragging: DragState,
    surface: Option<Rc<dyn TrackSurface>>,
    render_hook: Option<RenderHook>,
    gesture: Option<Gesture>,
    gesture_count: u64,
}

impl ViewState {
    fn frame(&self) -> TrackFrame {
        TrackFrame {
            emissions: self.emissions.clone(),
            completion: self.completion,
            end: self.props.end,
            width: self.props.width,
            dragging: self.dragging,
        }
    }

    /// Pending redraw, to be sent once the state borrow is released.
    fn redraw(&self) -> Option<Redraw> {
        self.render_hook
            .clone()
            .map(|hook| Redraw(hook, self.frame()))
    }

    fn transform(&self) -> Result<Transform, TransformError> {
        let surface = self.surface.as_ref().ok_or(TransformError::NoSurface)?;
        Ok(Transform {
            rect: surface.client_rect(),
            domain_width: self.props.width,
            max: self.props.max_value(),
            completion: self.props.completion,
        })
    }

    #[inline]
    fn owns(&self, serial: u64) -> bool {
        self.gesture.map(|g| g.serial) == Some(serial)
    }
}

enum Notify {
    Emissions(EmissionsCallback, Vec<Emission>),
    Completion(CompletionCallback, f64),
}

impl Notify {
    fn send(self) {
        match self {
            Notify::Emissions(callback, emissions) => callback(&emissions),
            Notify::Completion(callback, value) => callback(value),
        }
    }
}

struct Redraw(RenderHook, TrackFrame);

impl Redraw {
    fn send(self) {
        (self.0)(&self.1)
    }
}

fn send_redraw(redraw: Option<Redraw>) {
    if let Some(redraw) = redraw {
        redraw.send();
    }
}

/// Handle to one track's interaction state. Clones share the same state, so
/// presenters and host closures can each hold one.
#[derive(Clone)]
pub struct DraggableView {
    state: Rc<RefCell<ViewState>>,
    pointer: PointerDispatcher,
}

impl DraggableView {
    pub fn new(props: DraggableProps, pointer: PointerDispatcher) -> Self {
        let state = ViewState {
            emissions: stamp_emissions(&props.emissions),
            completion: props.completion,
            props,
            dragging: DragState::Idle,
            surface: None,
            render_hook: None,
            gesture: None,
            gesture_count: 0,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
            pointer,
        }
    }

    /// Capture the track's root surface.
    pub fn store_ref(&self, surface: Rc<dyn TrackSurface>) {
        self.state.borrow_mut().surface = Some(surface);
    }

    /// Called with a fresh frame after every local state change.
    pub fn on_render(&self, hook: impl Fn(&TrackFrame) + 'static) {
        self.state.borrow_mut().render_hook = Some(Rc::new(hook));
    }

    pub fn props(&self) -> DraggableProps {
        self.state.borrow().props.clone()
    }

    /// Resynchronize from the owner. Emissions are re-stamped when the
    /// sequence is a different allocation, even if its contents are equal.
    pub fn set_props(&self, next: DraggableProps) {
        let redraw = {
            let mut state = self.state.borrow_mut();
            if !Rc::ptr_eq(&state.props.emissions, &next.emissions) {
                state.emissions = stamp_emissions(&next.emissions);
                log::debug!("[props] re-stamped {} emissions", state.emissions.len());
            }
            if state.props.completion != next.completion {
                state.completion = next.completion;
                log::debug!("[props] completion -> {}", next.completion);
            }
            state.props = next;
            state.redraw()
        };
        send_redraw(redraw);
    }

    pub fn render(&self) -> TrackFrame {
        self.state.borrow().frame()
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.state.borrow().emissions.clone()
    }

    pub fn completion(&self) -> f64 {
        self.state.borrow().completion
    }

    pub fn dragging(&self) -> DragState {
        self.state.borrow().dragging
    }

    /// Current pixel-to-domain mapping; fails until a surface is stored.
    pub fn transform(&self) -> Result<Transform, TransformError> {
        self.state.borrow().transform()
    }

    pub fn on_pointer_down_emission(&self, grab: EmissionGrab) {
        self.begin(DragState::Emission(grab.id), grab.zone);
    }

    pub fn on_pointer_down_completion(&self, grab: CompletionGrab) {
        self.begin(DragState::Completion, grab.zone);
    }

    /// Tear down the active gesture, if any, leaving values where they are.
    pub fn cancel_gesture(&self) {
        let gesture = {
            let mut state = self.state.borrow_mut();
            let gesture = state.gesture.take();
            if gesture.is_some() {
                log::info!("[drag] cancelled {:?}", state.dragging);
                state.dragging = DragState::Idle;
            }
            gesture
        };
        if let Some(gesture) = gesture {
            self.pointer.unsubscribe(gesture.subscription);
            let redraw = self.state.borrow().redraw();
            send_redraw(redraw);
        }
    }

    fn begin(&self, target: DragState, zone: DragZone) {
        self.cancel_gesture();

        let serial = {
            let mut state = self.state.borrow_mut();
            state.gesture_count += 1;
            state.dragging = target;
            state.gesture_count
        };
        log::info!("[drag] begin {:?} zone {}..{}", target, zone.left_x, zone.right_x);

        let mut session = DragSession {
            view: Rc::downgrade(&self.state),
            serial,
            target,
            zone,
            throttle: Throttle::new(DRAG_THROTTLE_INTERVAL),
        };
        let subscription = self.pointer.subscribe(move |event| session.handle(event));
        let redraw = {
            let mut state = self.state.borrow_mut();
            state.gesture = Some(Gesture {
                serial,
                subscription,
            });
            state.redraw()
        };
        send_redraw(redraw);
    }
}

/// One gesture's subscription state. Dropping it ends the gesture.
struct DragSession {
    view: Weak<RefCell<ViewState>>,
    serial: u64,
    target: DragState,
    zone: DragZone,
    throttle: Throttle,
}

impl DragSession {
    fn handle(&mut self, event: &PointerEvent) -> Flow {
        let mv = match event {
            PointerEvent::Release(kind) => {
                log::debug!("[drag] {:?} ends {:?}", kind, self.target);
                return Flow::Complete;
            }
            PointerEvent::Move(mv) => mv,
        };
        if !self.throttle.admit(mv.at) {
            return Flow::Continue;
        }
        let Some(view) = self.view.upgrade() else {
            return Flow::Complete;
        };

        let (redraw, notify) = {
            let mut state = view.borrow_mut();
            if !state.owns(self.serial) {
                return Flow::Complete;
            }
            let value = match state
                .transform()
                .and_then(|t| t.client_to_value(self.zone, mv.client_x()))
            {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("[drag] skipped move: {e}");
                    return Flow::Continue;
                }
            };
            let notify = match self.target {
                DragState::Emission(id) => {
                    state.emissions = with_x(&state.emissions, id, value);
                    state
                        .props
                        .on_change_emissions
                        .clone()
                        .map(|cb| Notify::Emissions(cb, state.emissions.clone()))
                }
                DragState::Completion => {
                    state.completion = value;
                    state
                        .props
                        .on_change_completion
                        .clone()
                        .map(|cb| Notify::Completion(cb, value))
                }
                DragState::Idle => None,
            };
            (state.redraw(), notify)
        };

        // Hooks run with the view unborrowed so they may re-enter it
        send_redraw(redraw);
        if let Some(notify) = notify {
            notify.send();
        }
        Flow::Continue
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        let Some(view) = self.view.upgrade() else {
            return;
        };
        let redraw = {
            let Ok(mut state) = view.try_borrow_mut() else {
                log::warn!("[drag] view busy while ending {:?}", self.target);
                return;
            };
            if !state.owns(self.serial) {
                return;
            }
            state.gesture = None;
            state.dragging = DragState::Idle;
            log::info!("[drag] end {:?}", self.target);
            state.redraw()
        };
        send_redraw(redraw);
    }
}
