/// Vidcube Web - WASM entry point for the video cube
///
/// Wires the core frame driver to a WebGL2 canvas, a browser media
/// element and requestAnimationFrame.

use log::{info, Level};
use wasm_bindgen::prelude::*;

use vidcube_core::{FatalReporter, FrameDriver, SceneConfig};

pub mod media;
pub mod surface;
pub mod webgl;

pub use media::MediaSource;
pub use surface::{AlertReporter, CanvasSurface};
pub use webgl::{MediaFrame, WebGlDevice};

const DEFAULT_CANVAS_SELECTOR: &str = "#glcanvas";
const AUDIO_ELEMENT_ID: &str = "audio";
const LOG_LEVEL: Level = Level::Info;

#[wasm_bindgen]
pub struct WebRenderer {
    canvas_selector: String,
    config: SceneConfig,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRenderer {
        WebRenderer {
            canvas_selector: DEFAULT_CANVAS_SELECTOR.to_string(),
            config: SceneConfig::default(),
        }
    }

    /// Use a different canvas than `#glcanvas`
    pub fn set_canvas_selector(&mut self, selector: &str) {
        self.canvas_selector = selector.to_string();
    }

    /// Play a video on the cube
    pub fn start_video(&self, url: &str) -> Result<(), JsValue> {
        self.start(MediaSource::video(url)?)
    }

    /// Show a still image on the cube
    pub fn start_image(&self, url: &str) -> Result<(), JsValue> {
        self.start(MediaSource::image(url)?)
    }
}

impl WebRenderer {
    fn start(&self, source: MediaSource) -> Result<(), JsValue> {
        let surface = CanvasSurface::from_selector(&self.canvas_selector)?;
        let mut reporter = AlertReporter;

        let device = match WebGlDevice::from_canvas(surface.canvas()) {
            Ok(device) => device,
            Err(e) => {
                log::error!("{}", e);
                reporter.report(&e);
                return Err(JsValue::from_str(&e.to_string()));
            }
        };

        let driver = FrameDriver::start(device, source, &self.config, &mut reporter)
            .ok_or_else(|| JsValue::from_str("renderer initialization failed"))?;

        surface::play_audio_on_load(AUDIO_ELEMENT_ID)?;
        info!("rendering into {}", self.canvas_selector);
        surface::run_animation_loop(driver, surface)
    }
}

impl Default for WebRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(LOG_LEVEL).ok();

    Ok(())
}
