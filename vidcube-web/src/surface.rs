/// Canvas surface, alert reporting and the requestAnimationFrame loop
use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, DocumentReadyState, HtmlAudioElement, HtmlCanvasElement, Window};

use vidcube_core::{FatalReporter, FrameDriver, InitError, Viewport};

use crate::media::{warn_on_rejection, MediaSource};
use crate::webgl::WebGlDevice;

pub type WebFrameDriver = FrameDriver<WebGlDevice, MediaSource>;

fn get_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("No window object available"))
}

/// The canvas the cube is drawn into
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn from_selector(selector: &str) -> Result<Self, JsValue> {
        let canvas = get_window()?
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("No element matches {}", selector)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;
        Ok(Self { canvas })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Displayed size of the canvas, which is what the aspect ratio follows
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }
}

/// Shows fatal errors in a blocking alert dialog
#[derive(Debug, Default)]
pub struct AlertReporter;

impl FatalReporter for AlertReporter {
    fn report(&mut self, error: &InitError) {
        let message = match error {
            InitError::ContextUnavailable(_) => {
                format!("Browser does not support WebGL: {}", error)
            }
            _ => format!("Unable to initialize the shader program: {}", error),
        };
        match get_window().and_then(|w| w.alert_with_message(&message)) {
            Ok(()) => {}
            Err(e) => error!("could not show alert: {:?}", e),
        }
    }
}

fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    get_window()?.request_animation_frame(f.as_ref().unchecked_ref())
}

/// Tick the driver on every display refresh, forever.
///
/// The callback re-registers itself, so the closure and the driver it owns
/// live until the page goes away.
pub fn run_animation_loop(
    mut driver: WebFrameDriver,
    surface: CanvasSurface,
) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::new(move |now: f64| {
        driver.tick(now, surface.viewport());

        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                error!("failed to request animation frame: {:?}", e);
            }
        }
    }));

    match g.borrow().as_ref() {
        Some(callback) => {
            request_animation_frame(callback)?;
        }
        None => return Err(JsValue::from_str("animation callback missing")),
    }
    info!("animation loop started");
    Ok(())
}

/// Start the page's `#audio` element once the window has loaded.
///
/// The wasm module usually finishes loading after the window's `load`
/// event, so an already complete document plays right away.
pub fn play_audio_on_load(element_id: &'static str) -> Result<(), JsValue> {
    let win = get_window()?;
    let document = win
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    if already_loaded(document.ready_state()) {
        play_audio(&document, element_id);
        return Ok(());
    }

    let onload = Closure::<dyn FnMut()>::new(move || {
        match window().and_then(|w| w.document()) {
            Some(document) => play_audio(&document, element_id),
            None => warn!("no document to play audio in"),
        }
    });
    win.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();
    Ok(())
}

/// The window's `load` event has already fired in this state
fn already_loaded(state: DocumentReadyState) -> bool {
    state == DocumentReadyState::Complete
}

fn play_audio(document: &Document, element_id: &str) {
    let audio = document
        .get_element_by_id(element_id)
        .and_then(|e| e.dyn_into::<HtmlAudioElement>().ok());
    match audio {
        Some(audio) => match audio.play() {
            Ok(promise) => warn_on_rejection("audio", &promise),
            Err(e) => warn!("audio playback did not start: {:?}", e),
        },
        None => warn!("no audio element with id {}", element_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_waits_for_load_only_while_loading() {
        assert!(already_loaded(DocumentReadyState::Complete));
        assert!(!already_loaded(DocumentReadyState::Interactive));
        assert!(!already_loaded(DocumentReadyState::Loading));
    }
}
