use crate::constants::GRAB_EVENTS;
use crate::input::MarkerGrab;
use crate::{dom, events, present};
use marbles_core::{
    CompletionGrab, DragState, DragZone, DraggableProps, DraggableView, Emission, EmissionGrab,
    EmissionInput,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// JS-side change listeners; swapped without touching the view's props.
#[derive(Default)]
struct JsListeners {
    emissions: RefCell<Option<js_sys::Function>>,
    completion: RefCell<Option<js_sys::Function>>,
}

impl JsListeners {
    fn emit_emissions(&self, emissions: &[Emission]) {
        if let Some(f) = self.emissions.borrow().as_ref() {
            let xs: js_sys::Array = emissions.iter().map(|e| JsValue::from_f64(e.x)).collect();
            if let Err(e) = f.call1(&JsValue::NULL, &xs) {
                log::error!("[props] onChangeEmissions threw: {:?}", e);
            }
        }
    }

    fn emit_completion(&self, value: f64) {
        if let Some(f) = self.completion.borrow().as_ref() {
            if let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_f64(value)) {
                log::error!("[props] onChangeCompletion threw: {:?}", e);
            }
        }
    }
}

/// A draggable marble track bound to an element of the page.
#[wasm_bindgen]
pub struct MarbleDiagram {
    view: DraggableView,
    listeners: Rc<JsListeners>,
}

#[wasm_bindgen]
impl MarbleDiagram {
    #[wasm_bindgen(constructor)]
    pub fn new(
        track_id: &str,
        xs: Vec<f64>,
        completion: f64,
        width: f64,
        end: Option<f64>,
    ) -> Result<MarbleDiagram, JsValue> {
        build(track_id, xs, completion, width, end)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    #[wasm_bindgen(js_name = setEmissions)]
    pub fn set_emissions(&self, xs: Vec<f64>) {
        self.view.set_props(DraggableProps {
            emissions: emission_inputs(xs),
            ..self.view.props()
        });
    }

    #[wasm_bindgen(js_name = setCompletion)]
    pub fn set_completion(&self, completion: f64) {
        self.view.set_props(DraggableProps {
            completion,
            ..self.view.props()
        });
    }

    #[wasm_bindgen(js_name = setEnd)]
    pub fn set_end(&self, end: Option<f64>) {
        self.view.set_props(self.view.props().with_end(end));
    }

    #[wasm_bindgen(js_name = onChangeEmissions)]
    pub fn on_change_emissions(&self, f: Option<js_sys::Function>) {
        *self.listeners.emissions.borrow_mut() = f;
    }

    #[wasm_bindgen(js_name = onChangeCompletion)]
    pub fn on_change_completion(&self, f: Option<js_sys::Function>) {
        *self.listeners.completion.borrow_mut() = f;
    }

    #[wasm_bindgen(js_name = grabEmission)]
    pub fn grab_emission(&self, id: usize, left_x: f64, right_x: f64) {
        self.view.on_pointer_down_emission(EmissionGrab {
            id,
            zone: DragZone::new(left_x, right_x),
        });
    }

    #[wasm_bindgen(js_name = grabCompletion)]
    pub fn grab_completion(&self, left_x: f64, right_x: f64) {
        self.view.on_pointer_down_completion(CompletionGrab {
            zone: DragZone::new(left_x, right_x),
        });
    }

    pub fn cancel(&self) {
        self.view.cancel_gesture();
    }

    pub fn emissions(&self) -> Vec<f64> {
        self.view.emissions().iter().map(|e| e.x).collect()
    }

    pub fn completion(&self) -> f64 {
        self.view.completion()
    }

    /// Identifier of the emission being dragged, if any.
    pub fn dragging(&self) -> Option<u32> {
        self.view.dragging().emission_id().map(|id| id as u32)
    }

    #[wasm_bindgen(js_name = draggingCompletion)]
    pub fn dragging_completion(&self) -> bool {
        self.view.dragging() == DragState::Completion
    }
}

fn emission_inputs(xs: Vec<f64>) -> Rc<[EmissionInput]> {
    xs.into_iter().map(EmissionInput::new).collect()
}

fn build(
    track_id: &str,
    xs: Vec<f64>,
    completion: f64,
    width: f64,
    end: Option<f64>,
) -> anyhow::Result<MarbleDiagram> {
    let track = dom::track_element(track_id)?;
    let listeners = Rc::new(JsListeners::default());

    let props = {
        let on_emissions = listeners.clone();
        let on_completion = listeners.clone();
        DraggableProps::new(emission_inputs(xs), completion, width)
            .with_end(end)
            .with_on_change_emissions(move |emissions| on_emissions.emit_emissions(emissions))
            .with_on_change_completion(move |value| on_completion.emit_completion(value))
    };
    let view = DraggableView::new(props, events::shared_dispatcher());
    view.store_ref(Rc::new(dom::ElementSurface::new(track.clone())));

    let track_for_render = track.clone();
    view.on_render(move |frame| present::sync_frame(&track_for_render, frame));
    present::sync_frame(&track, &view.render());

    wire_marker_grabs(&track, &view);
    log::info!(
        "[track] #{} ready: {} emissions, completion {}",
        track_id,
        view.emissions().len(),
        completion
    );
    Ok(MarbleDiagram { view, listeners })
}

fn wire_marker_grabs(track: &web::Element, view: &DraggableView) {
    for name in GRAB_EVENTS {
        let view = view.clone();
        let track_for_listener = track.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            let width = view.props().width;
            let Some(grab) = dom::grab_from_event(&ev, &track_for_listener, width) else {
                return;
            };
            match grab {
                MarkerGrab::Emission(grab) => view.on_pointer_down_emission(grab),
                MarkerGrab::Completion(grab) => view.on_pointer_down_completion(grab),
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        if let Err(e) = track.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::error!("[track] {} listener error: {:?}", name, e);
        }
        closure.forget();
    }
}
