/// Browser media elements used as the cube's texture source.
///
/// DOM listeners only queue [`VideoEvent`]s; the frame driver drains the
/// queue at the start of each tick and folds it into its readiness state.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlImageElement, HtmlVideoElement, Url};

use vidcube_core::{TextureSampling, VideoEvent, VideoSource};

use crate::webgl::MediaFrame;

type EventQueue = Rc<RefCell<Vec<VideoEvent>>>;

/// A video or still image plus the readiness events it has reported
pub struct MediaSource {
    frame: MediaFrame,
    events: EventQueue,
    // Kept alive for as long as the element can fire them
    _listeners: Vec<Closure<dyn FnMut()>>,
}

impl MediaSource {
    /// Create a looping, inline video element and start playback
    pub fn video(url: &str) -> Result<Self, JsValue> {
        let video: HtmlVideoElement = document()?
            .create_element("video")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not a video"))?;

        video.set_attribute("playsinline", "")?;
        video.set_muted(false);
        video.set_loop(true);

        let events = EventQueue::default();
        let playing = queue_listener(&events, &[VideoEvent::Playing]);
        let timeupdate = queue_listener(&events, &[VideoEvent::TimeUpdate]);
        video.add_event_listener_with_callback_and_bool(
            "playing",
            playing.as_ref().unchecked_ref(),
            true,
        )?;
        video.add_event_listener_with_callback("timeupdate", timeupdate.as_ref().unchecked_ref())?;

        if is_cross_origin(url)? {
            video.set_cross_origin(Some("anonymous"));
        }
        video.set_src(url);
        // Blocked autoplay leaves the placeholder texture up
        match video.play() {
            Ok(promise) => warn_on_rejection("video", &promise),
            Err(e) => warn!("video playback did not start: {:?}", e),
        }
        info!("loading video from {}", url);

        Ok(Self {
            frame: MediaFrame::Video(video),
            events,
            _listeners: vec![playing, timeupdate],
        })
    }

    /// Load a still image. It counts as ready once it has loaded.
    pub fn image(url: &str) -> Result<Self, JsValue> {
        let image = HtmlImageElement::new()?;

        let events = EventQueue::default();
        let load = queue_listener(&events, &[VideoEvent::Playing, VideoEvent::TimeUpdate]);
        image.add_event_listener_with_callback("load", load.as_ref().unchecked_ref())?;

        if is_cross_origin(url)? {
            image.set_cross_origin(Some("anonymous"));
        }
        image.set_src(url);
        info!("loading image from {}", url);

        Ok(Self {
            frame: MediaFrame::Image(image),
            events,
            _listeners: vec![load],
        })
    }
}

impl VideoSource for MediaSource {
    type Frame = MediaFrame;

    fn drain_events(&mut self) -> Vec<VideoEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn current_frame(&self) -> &MediaFrame {
        &self.frame
    }

    fn sampling(&self) -> TextureSampling {
        match &self.frame {
            MediaFrame::Video(_) => TextureSampling::for_video(),
            MediaFrame::Image(image) => {
                TextureSampling::for_image(image.natural_width(), image.natural_height())
            }
        }
    }

    fn is_still(&self) -> bool {
        matches!(self.frame, MediaFrame::Image(_))
    }
}

fn queue_listener(events: &EventQueue, fired: &'static [VideoEvent]) -> Closure<dyn FnMut()> {
    let events = events.clone();
    Closure::new(move || {
        debug!("media event {:?}", fired);
        events.borrow_mut().extend_from_slice(fired);
    })
}

/// Log a rejected `play()` promise instead of letting it go unhandled
pub(crate) fn warn_on_rejection(element: &'static str, promise: &Promise) {
    let on_reject = Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
        warn!("{} playback was rejected: {:?}", element, e);
    });
    let _ = promise.catch(&on_reject);
    on_reject.forget();
}

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

/// Media from another origin needs a CORS request to be usable as a texture
fn is_cross_origin(url: &str) -> Result<bool, JsValue> {
    let location = window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .location();
    let target = Url::new_with_base(url, &location.href()?)?;
    Ok(differs_in_origin(&target.origin(), &location.origin()?))
}

fn differs_in_origin(target: &str, page: &str) -> bool {
    !target.eq_ignore_ascii_case(page)
}
