/// Collaborator traits: the graphics context, the media source, the
/// display surface and the fatal error reporter.
///
/// The browser build implements these on top of WebGL and the DOM; tests
/// implement them with recording doubles.
use crate::error::{GraphicsError, InitError};
use crate::shader::ShaderSources;
use crate::texture::{RgbaImage, TextureSampling, VideoEvent};
use crate::transform::Viewport;

/// Retained-mode graphics context operations used by the renderer.
///
/// Everything except program creation and resource allocation is
/// assumed to succeed once initialization has.
pub trait GraphicsDevice {
    type Buffer;
    type Texture;
    type Program;
    type UniformLocation;
    /// Backend-specific handle to a media frame that can be uploaded directly
    type Frame: ?Sized;

    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<Self::Buffer, GraphicsError>;
    fn create_index_buffer(&mut self, data: &[u16]) -> Result<Self::Buffer, GraphicsError>;

    /// Compile both stages and link them
    fn create_program(&mut self, sources: &ShaderSources) -> Result<Self::Program, InitError>;
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    fn create_texture(&mut self) -> Result<Self::Texture, GraphicsError>;
    /// Store rows bottom-up so browser images appear upright
    fn set_unpack_flip_y(&mut self, flip: bool);
    fn upload_image(
        &mut self,
        texture: &Self::Texture,
        image: &RgbaImage,
    ) -> Result<(), GraphicsError>;
    fn upload_frame(
        &mut self,
        texture: &Self::Texture,
        frame: &Self::Frame,
    ) -> Result<(), GraphicsError>;
    fn set_sampling(&mut self, texture: &Self::Texture, sampling: TextureSampling);

    fn clear(&mut self, color: [f32; 4], depth: f32);
    /// Depth test with a less-or-equal comparison
    fn enable_depth_test(&mut self);
    fn bind_attribute(&mut self, buffer: &Self::Buffer, location: u32, components: i32);
    fn bind_index_buffer(&mut self, buffer: &Self::Buffer);
    fn use_program(&mut self, program: &Self::Program);
    fn uniform_matrix4(&mut self, location: Option<&Self::UniformLocation>, matrix: &[f32; 16]);
    fn uniform_sampler(&mut self, location: Option<&Self::UniformLocation>, unit: u32);
    /// Indexed triangle list over 16-bit indices
    fn draw_triangles(&mut self, index_count: i32);
    fn bind_texture(&mut self, texture: &Self::Texture, unit: u32);
}

/// Source of the frames shown on the cube
pub trait VideoSource {
    type Frame: ?Sized;

    /// Readiness events observed since the last call, in arrival order
    fn drain_events(&mut self) -> Vec<VideoEvent>;

    /// The frame to upload this tick
    fn current_frame(&self) -> &Self::Frame;

    fn sampling(&self) -> TextureSampling {
        TextureSampling::for_video()
    }

    /// A still image only needs to be uploaded once
    fn is_still(&self) -> bool {
        false
    }
}

/// The drawable region and its refresh clock
pub trait DisplaySurface {
    fn viewport(&self) -> Viewport;

    /// Wait for the next refresh and return its timestamp in milliseconds,
    /// or `None` once the host stops refreshing.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Surfaces a fatal initialization failure to the user
pub trait FatalReporter {
    fn report(&mut self, error: &InitError);
}
