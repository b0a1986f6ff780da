/// GPU resources for the cube and the per-frame draw sequence
use log::info;

use crate::backend::GraphicsDevice;
use crate::config::SceneConfig;
use crate::error::{GraphicsError, InitError};
use crate::geometry::{
    CubeGeometry, NORMAL_COMPONENTS, POSITION_COMPONENTS, TEX_COORD_COMPONENTS,
};
use crate::shader::{self, ShaderSources};
use crate::texture::{RgbaImage, TextureSampling};
use crate::transform::{to_column_array, FrameMatrices};

/// Texture unit the cube texture is bound to
pub const TEXTURE_UNIT: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AttribLocations {
    position: u32,
    normal: u32,
    tex_coord: u32,
}

struct UniformLocations<U> {
    projection: Option<U>,
    model_view: Option<U>,
    normal: Option<U>,
    sampler: Option<U>,
}

struct GeometryBuffers<B> {
    positions: B,
    tex_coords: B,
    normals: B,
    indices: B,
    index_count: i32,
}

/// Owns the program, buffers and texture for the cube
pub struct CubeRenderer<D: GraphicsDevice> {
    program: D::Program,
    attribs: AttribLocations,
    uniforms: UniformLocations<D::UniformLocation>,
    buffers: GeometryBuffers<D::Buffer>,
    texture: D::Texture,
    clear_color: [f32; 4],
    clear_depth: f32,
}

impl<D: GraphicsDevice> CubeRenderer<D> {
    /// Link the shader program, upload the geometry and create the
    /// placeholder texture
    pub fn new(
        device: &mut D,
        geometry: &CubeGeometry,
        config: &SceneConfig,
    ) -> Result<Self, InitError> {
        let sources = ShaderSources::new(&config.lighting);
        let program = device.create_program(&sources)?;

        let attrib = |name: &'static str| {
            device
                .attrib_location(&program, name)
                .ok_or(InitError::MissingAttribute(name))
        };
        let attribs = AttribLocations {
            position: attrib(shader::ATTRIB_POSITION)?,
            normal: attrib(shader::ATTRIB_NORMAL)?,
            tex_coord: attrib(shader::ATTRIB_TEX_COORD)?,
        };
        let uniforms = UniformLocations {
            projection: device.uniform_location(&program, shader::UNIFORM_PROJECTION),
            model_view: device.uniform_location(&program, shader::UNIFORM_MODEL_VIEW),
            normal: device.uniform_location(&program, shader::UNIFORM_NORMAL),
            sampler: device.uniform_location(&program, shader::UNIFORM_SAMPLER),
        };

        let buffers = GeometryBuffers {
            positions: device.create_vertex_buffer(geometry.positions())?,
            tex_coords: device.create_vertex_buffer(geometry.tex_coords())?,
            normals: device.create_vertex_buffer(geometry.normals())?,
            indices: device.create_index_buffer(geometry.indices())?,
            index_count: geometry.index_count() as i32,
        };

        let texture = device.create_texture()?;
        device.upload_image(&texture, &RgbaImage::solid(config.placeholder_pixel))?;
        device.set_sampling(&texture, TextureSampling::for_video());
        device.set_unpack_flip_y(true);

        info!(
            "cube renderer ready: {} vertices, {} indices",
            geometry.vertex_count(),
            geometry.index_count()
        );

        Ok(Self {
            program,
            attribs,
            uniforms,
            buffers,
            texture,
            clear_color: config.clear_color,
            clear_depth: config.clear_depth,
        })
    }

    /// Replace the texture contents with a media frame
    pub fn upload_frame(
        &self,
        device: &mut D,
        frame: &D::Frame,
        sampling: TextureSampling,
    ) -> Result<(), GraphicsError> {
        device.upload_frame(&self.texture, frame)?;
        device.set_sampling(&self.texture, sampling);
        Ok(())
    }

    /// Issue one frame's worth of commands.
    ///
    /// The normal matrix and sampler are set after the draw call, so the
    /// lighting of a frame uses the normal matrix of the previous one.
    pub fn draw(&self, device: &mut D, matrices: &FrameMatrices) {
        device.clear(self.clear_color, self.clear_depth);
        device.enable_depth_test();

        device.bind_attribute(
            &self.buffers.positions,
            self.attribs.position,
            POSITION_COMPONENTS,
        );
        device.bind_attribute(
            &self.buffers.tex_coords,
            self.attribs.tex_coord,
            TEX_COORD_COMPONENTS,
        );
        device.bind_attribute(&self.buffers.normals, self.attribs.normal, NORMAL_COMPONENTS);
        device.bind_index_buffer(&self.buffers.indices);

        device.use_program(&self.program);
        device.uniform_matrix4(
            self.uniforms.projection.as_ref(),
            &to_column_array(&matrices.projection),
        );
        device.uniform_matrix4(
            self.uniforms.model_view.as_ref(),
            &to_column_array(&matrices.model_view),
        );
        device.draw_triangles(self.buffers.index_count);

        device.uniform_matrix4(
            self.uniforms.normal.as_ref(),
            &to_column_array(&matrices.normal),
        );
        device.bind_texture(&self.texture, TEXTURE_UNIT);
        device.uniform_sampler(self.uniforms.sampler.as_ref(), TEXTURE_UNIT);
    }
}
