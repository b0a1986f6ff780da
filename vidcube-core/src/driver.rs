/// Frame driver: owns the loop state and runs one tick per display refresh
use log::{error, info, warn};

use crate::backend::{DisplaySurface, FatalReporter, GraphicsDevice, VideoSource};
use crate::config::SceneConfig;
use crate::error::InitError;
use crate::geometry::CubeGeometry;
use crate::renderer::CubeRenderer;
use crate::texture::ReadinessState;
use crate::transform::{FrameTransform, Viewport};

/// Mutable state carried from one tick to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoopState {
    /// Accumulated rotation in radians
    pub rotation: f64,
    /// Timestamp of the previous tick in seconds, 0 before the first tick
    pub previous_now: f64,
    pub delta_time: f64,
    pub readiness: ReadinessState,
}

impl LoopState {
    /// Convert a millisecond timestamp to seconds and update the clock.
    ///
    /// The first tick measures against 0, so its delta is the raw timestamp.
    pub fn advance_clock(&mut self, now_ms: f64) -> f64 {
        let now = now_ms * 0.001;
        self.delta_time = now - self.previous_now;
        self.previous_now = now;
        self.delta_time
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub delta_time: f64,
    /// Rotation the frame was drawn with
    pub rotation: f64,
    pub uploaded: bool,
    pub drawn: bool,
}

pub struct FrameDriver<D: GraphicsDevice, V> {
    device: D,
    source: V,
    renderer: CubeRenderer<D>,
    transform: FrameTransform,
    state: LoopState,
    still_uploaded: bool,
    frames: u64,
}

impl<D, V> FrameDriver<D, V>
where
    D: GraphicsDevice,
    V: VideoSource<Frame = D::Frame>,
{
    pub fn new(mut device: D, source: V, config: &SceneConfig) -> Result<Self, InitError> {
        let geometry = CubeGeometry::default();
        let renderer = CubeRenderer::new(&mut device, &geometry, config)?;

        Ok(Self {
            device,
            source,
            renderer,
            transform: FrameTransform::new(config.projection, config.camera),
            state: LoopState::default(),
            still_uploaded: false,
            frames: 0,
        })
    }

    /// Initialize, or report the failure once and give up
    pub fn start<R: FatalReporter>(
        device: D,
        source: V,
        config: &SceneConfig,
        reporter: &mut R,
    ) -> Option<Self> {
        match Self::new(device, source, config) {
            Ok(driver) => {
                info!("frame driver initialized");
                Some(driver)
            }
            Err(e) => {
                error!("initialization failed: {}", e);
                reporter.report(&e);
                None
            }
        }
    }

    pub fn tick(&mut self, now_ms: f64, viewport: Viewport) -> TickReport {
        let delta_time = self.state.advance_clock(now_ms);

        let events = self.source.drain_events();
        self.state.readiness = self.state.readiness.apply(events);

        let uploaded = self.upload_if_ready();

        let rotation = self.state.rotation;
        let drawn = match self.transform.compute(rotation, viewport) {
            Ok(matrices) => {
                self.renderer.draw(&mut self.device, &matrices);
                true
            }
            Err(e) => {
                warn!("skipping frame {}: {}", self.frames, e);
                false
            }
        };

        self.state.rotation += delta_time;
        self.frames += 1;

        TickReport {
            delta_time,
            rotation,
            uploaded,
            drawn,
        }
    }

    fn upload_if_ready(&mut self) -> bool {
        if !self.state.readiness.is_ready() {
            return false;
        }
        if self.source.is_still() && self.still_uploaded {
            return false;
        }

        let sampling = self.source.sampling();
        match self
            .renderer
            .upload_frame(&mut self.device, self.source.current_frame(), sampling)
        {
            Ok(()) => {
                self.still_uploaded = true;
                true
            }
            // The texture keeps its previous pixels and the frame is still drawn
            Err(e) => {
                warn!("texture upload failed: {}", e);
                false
            }
        }
    }

    /// Tick once per refresh until the surface stops producing frames.
    /// Returns the number of ticks run.
    pub fn run<S: DisplaySurface>(&mut self, surface: &mut S) -> u64 {
        let mut ticks = 0;
        while let Some(now_ms) = surface.next_frame() {
            self.tick(now_ms, surface.viewport());
            ticks += 1;
        }
        ticks
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_uses_raw_timestamp() {
        let mut state = LoopState::default();
        assert!((state.advance_clock(1500.0) - 1.5).abs() < 1e-12);
        assert!((state.advance_clock(1516.0) - 0.016).abs() < 1e-9);
        assert!((state.previous_now - 1.516).abs() < 1e-12);
    }
}
