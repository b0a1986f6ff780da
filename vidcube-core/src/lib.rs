/// Vidcube Core Library - the spinning video cube, independent of the browser
///
/// This library provides the cube geometry, the shader program text, the
/// per-frame transforms, the texture readiness rendezvous, the renderer
/// and the frame driver. Graphics and DOM access go through the traits in
/// `backend`.

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use backend::{DisplaySurface, FatalReporter, GraphicsDevice, VideoSource};
pub use config::{CameraConfig, LightingConfig, ProjectionConfig, SceneConfig};
pub use driver::{FrameDriver, LoopState, TickReport};
pub use error::{GraphicsError, InitError, ShaderStage, TransformError};
pub use geometry::{CubeGeometry, Face, Vertex};
pub use renderer::CubeRenderer;
pub use shader::ShaderSources;
pub use texture::{ReadinessState, RgbaImage, TextureSampling, VideoEvent};
pub use transform::{FrameMatrices, FrameTransform, Viewport};
