/// Error types shared by the core and its graphics backends
use thiserror::Error;

/// Shader pipeline stage, used when reporting compile failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure of a single graphics context operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphicsError {
    #[error("failed to create buffer")]
    CreateBuffer,
    #[error("failed to create texture")]
    CreateTexture,
    #[error("failed to create {0} shader")]
    CreateShader(ShaderStage),
    #[error("failed to create program")]
    CreateProgram,
    #[error("texture upload failed: {0}")]
    Upload(String),
}

/// Fatal errors raised while setting up the renderer.
///
/// Any of these aborts initialization; there is no degraded mode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("unable to link the shader program: {0}")]
    ProgramLink(String),
    #[error("shader program has no attribute named {0}")]
    MissingAttribute(&'static str),
    #[error(transparent)]
    Resource(#[from] GraphicsError),
}

/// Per-frame transform failures
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    #[error("model-view matrix is not invertible")]
    SingularModelView,
    #[error("viewport {width}x{height} has no usable aspect ratio")]
    DegenerateViewport { width: u32, height: u32 },
}
