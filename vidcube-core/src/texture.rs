/// Texture setup parameters and the video readiness rendezvous
use log::debug;

/// Events the video element reports that matter for texture uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEvent {
    /// Playback has started
    Playing,
    /// The playback position advanced, so a decoded frame exists
    TimeUpdate,
}

/// Whether the video has produced a frame that is safe to sample.
///
/// Both conditions must be observed, in either order, before frames
/// are uploaded. `Ready` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessState {
    #[default]
    NotPlaying,
    Playing,
    TimeUpdated,
    Ready,
}

impl ReadinessState {
    pub fn transition(self, event: VideoEvent) -> Self {
        use ReadinessState::*;
        match (self, event) {
            (NotPlaying, VideoEvent::Playing) => Playing,
            (NotPlaying, VideoEvent::TimeUpdate) => TimeUpdated,
            (Playing, VideoEvent::TimeUpdate) | (TimeUpdated, VideoEvent::Playing) => Ready,
            (state, _) => state,
        }
    }

    /// Apply a batch of events in arrival order
    pub fn apply<I: IntoIterator<Item = VideoEvent>>(self, events: I) -> Self {
        events.into_iter().fold(self, |state, event| {
            let next = state.transition(event);
            if next != state {
                debug!("video readiness {:?} -> {:?} on {:?}", state, next, event);
            }
            next
        })
    }

    pub fn is_ready(self) -> bool {
        self == ReadinessState::Ready
    }
}

/// How a texture is filtered and wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSampling {
    /// Generate mipmaps, repeat in S and T, nearest-mipmap-linear
    /// minification. Only valid for power-of-two sizes.
    Mipmapped,
    /// Clamp to edge in S and T, linear minification, no mipmaps
    ClampLinear,
}

impl TextureSampling {
    /// Video frames can be any size, so they never get mipmaps
    pub fn for_video() -> Self {
        TextureSampling::ClampLinear
    }

    /// Still images get mipmaps only when both sides are powers of two
    pub fn for_image(width: u32, height: u32) -> Self {
        if is_power_of_two(width) && is_power_of_two(height) {
            TextureSampling::Mipmapped
        } else {
            TextureSampling::ClampLinear
        }
    }
}

pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

/// A tightly packed RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// 1x1 image of a single color
    pub fn solid(pixel: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: pixel.to_vec(),
        }
    }
}
