use std::cell::Cell;
use std::rc::Rc;

use glam::DVec2;
use instant::Instant;
use marbles_core::{
    CompletionGrab, DraggableProps, DraggableView, DragZone, Emission, EmissionGrab,
    EmissionInput, PointerDispatcher, PointerEvent, PointerMove, ReleaseKind, TrackRect,
    DEFAULT_COMPLETION, DEFAULT_DOMAIN_WIDTH, DEFAULT_EMISSION_XS, HIT_RADIUS_PX,
};
use winit::{dpi::PhysicalSize, event::*, event_loop::EventLoop, window::WindowBuilder};

mod track;

use track::{frame_title, nearest_marker, track_rect, MarkerHit};

struct Host {
    view: DraggableView,
    pointer: PointerDispatcher,
    rect: Rc<Cell<TrackRect>>,
    cursor: DVec2,
    primary_touch: Option<u64>,
}

impl Host {
    fn new(size: PhysicalSize<u32>) -> Self {
        let pointer = PointerDispatcher::new();
        let inputs: Vec<EmissionInput> = DEFAULT_EMISSION_XS
            .iter()
            .copied()
            .map(EmissionInput::new)
            .collect();
        let props = DraggableProps::new(inputs, DEFAULT_COMPLETION, DEFAULT_DOMAIN_WIDTH)
            .with_on_change_emissions(|emissions: &[Emission]| {
                let xs: Vec<f64> = emissions.iter().map(|e| e.x).collect();
                log::info!("[owner] emissions {:?}", xs);
            })
            .with_on_change_completion(|value| log::info!("[owner] completion {:.2}", value));
        let view = DraggableView::new(props, pointer.clone());

        let rect = Rc::new(Cell::new(track_rect(size)));
        view.store_ref(rect.clone());

        Self {
            view,
            pointer,
            rect,
            cursor: DVec2::ZERO,
            primary_touch: None,
        }
    }

    fn zone(&self) -> DragZone {
        DragZone::full(self.view.props().width)
    }

    /// Start a gesture on whatever marker sits under `at`.
    fn press(&self, at: DVec2) {
        let transform = match self.view.transform() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[input] press ignored: {}", e);
                return;
            }
        };
        let zone = self.zone();
        let frame = self.view.render();
        match nearest_marker(&frame, &transform, zone, at.x, HIT_RADIUS_PX) {
            Some(MarkerHit::Emission(id)) => {
                self.view.on_pointer_down_emission(EmissionGrab { id, zone })
            }
            Some(MarkerHit::Completion) => {
                self.view.on_pointer_down_completion(CompletionGrab { zone })
            }
            None => log::debug!("[input] press at {:.0} hit nothing", at.x),
        }
    }

    fn touch(&mut self, touch: Touch) {
        let at = DVec2::new(touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started if self.primary_touch.is_none() => {
                self.primary_touch = Some(touch.id);
                self.press(at);
            }
            TouchPhase::Moved if self.primary_touch == Some(touch.id) => {
                if let Some(mv) = PointerMove::first_touch(&[at], Instant::now()) {
                    self.pointer.dispatch(PointerEvent::Move(mv));
                }
            }
            TouchPhase::Ended if self.primary_touch == Some(touch.id) => {
                self.primary_touch = None;
                self.pointer
                    .dispatch(PointerEvent::Release(ReleaseKind::TouchEnd));
            }
            TouchPhase::Cancelled if self.primary_touch == Some(touch.id) => {
                self.primary_touch = None;
                self.pointer
                    .dispatch(PointerEvent::Release(ReleaseKind::TouchCancel));
            }
            _ => {}
        }
    }

    fn handle(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized(size) => self.rect.set(track_rect(size)),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = DVec2::new(position.x, position.y);
                self.pointer.dispatch(PointerEvent::Move(PointerMove::mouse(
                    position.x,
                    position.y,
                    Instant::now(),
                )));
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.press(self.cursor),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => self
                .pointer
                .dispatch(PointerEvent::Release(ReleaseKind::MouseUp)),
            WindowEvent::Touch(touch) => self.touch(touch),
            WindowEvent::Focused(false) => self.view.cancel_gesture(),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let event_loop = EventLoop::new()?;
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("marbles (native)")
            .with_inner_size(PhysicalSize::new(
                track::WINDOW_WIDTH_PX,
                track::WINDOW_HEIGHT_PX,
            ))
            .build(&event_loop)?,
    );

    let mut host = Host::new(window.inner_size());
    {
        let window = window.clone();
        host.view
            .on_render(move |frame| window.set_title(&frame_title(frame)));
    }
    window.set_title(&frame_title(&host.view.render()));
    log::info!("[native] track ready at {:?}", host.rect.get());

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent { event, .. } => host.handle(event),
        _ => {}
    })?;
    Ok(())
}
