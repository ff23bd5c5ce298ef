use crate::constants::{MOVE_EVENTS, RELEASE_EVENTS};
use glam::DVec2;
use instant::Instant;
use marbles_core::{PointerDispatcher, PointerEvent, PointerMove, ReleaseKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    // Window listeners are registered on first use and live for the page
    static POINTER: PointerDispatcher = wire_window_pointer_events();
}

/// The page-wide dispatcher every track subscribes to.
pub fn shared_dispatcher() -> PointerDispatcher {
    POINTER.with(PointerDispatcher::clone)
}

fn wire_window_pointer_events() -> PointerDispatcher {
    let pointer = PointerDispatcher::new();
    let Some(window) = web::window() else {
        log::error!("[pointer] no window; drag input disabled");
        return pointer;
    };

    for name in MOVE_EVENTS {
        let p = pointer.clone();
        add_window_listener(&window, name, move |ev: web::Event| {
            if let Some(mv) = pointer_move(&ev) {
                p.dispatch(PointerEvent::Move(mv));
            }
        });
    }
    for name in RELEASE_EVENTS {
        let Some(kind) = release_kind(name) else {
            continue;
        };
        let p = pointer.clone();
        add_window_listener(&window, name, move |_ev: web::Event| {
            p.dispatch(PointerEvent::Release(kind));
        });
    }
    log::info!("[pointer] window listeners registered");
    pointer
}

fn pointer_move(ev: &web::Event) -> Option<PointerMove> {
    let now = Instant::now();
    if let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() {
        return Some(PointerMove::mouse(
            mouse.client_x() as f64,
            mouse.client_y() as f64,
            now,
        ));
    }
    let touch = ev.dyn_ref::<web::TouchEvent>()?;
    let first = touch.touches().get(0)?;
    PointerMove::first_touch(
        &[DVec2::new(first.client_x() as f64, first.client_y() as f64)],
        now,
    )
}

#[inline]
fn release_kind(name: &str) -> Option<ReleaseKind> {
    match name {
        "mouseup" => Some(ReleaseKind::MouseUp),
        "touchend" => Some(ReleaseKind::TouchEnd),
        "touchcancel" => Some(ReleaseKind::TouchCancel),
        _ => None,
    }
}

fn add_window_listener(window: &web::Window, name: &str, handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        log::error!("[pointer] {} listener error: {:?}", name, e);
    }
    closure.forget();
}
