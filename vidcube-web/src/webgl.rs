/// WebGL2 implementation of the graphics device
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, HtmlVideoElement, WebGl2RenderingContext as Gl,
    WebGlBuffer, WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation,
};

use vidcube_core::{
    GraphicsDevice, GraphicsError, InitError, RgbaImage, ShaderSources, ShaderStage,
    TextureSampling,
};

/// A media element whose current picture can be uploaded as a texture
#[derive(Debug, Clone)]
pub enum MediaFrame {
    Video(HtmlVideoElement),
    Image(HtmlImageElement),
}

pub struct WebGlDevice {
    gl: Gl,
}

impl WebGlDevice {
    /// Acquire a WebGL2 context from the canvas and clear it to black
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, InitError> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(|e| InitError::ContextUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| {
                InitError::ContextUnavailable("browser does not support WebGL2".to_string())
            })?
            .dyn_into::<Gl>()
            .map_err(|_| InitError::ContextUnavailable("context is not WebGL2".to_string()))?;

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT);

        Ok(Self { gl })
    }

    fn array_buffer(
        &self,
        target: u32,
        data: &js_sys::Object,
    ) -> Result<WebGlBuffer, GraphicsError> {
        let buffer = self.gl.create_buffer().ok_or(GraphicsError::CreateBuffer)?;
        self.gl.bind_buffer(target, Some(&buffer));
        self.gl
            .buffer_data_with_array_buffer_view(target, data, Gl::STATIC_DRAW);
        Ok(buffer)
    }
}

/// Compile a shader, returning the driver log on failure
fn compile_shader(gl: &Gl, stage: ShaderStage, source: &str) -> Result<WebGlShader, InitError> {
    let shader_type = match stage {
        ShaderStage::Vertex => Gl::VERTEX_SHADER,
        ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(shader_type)
        .ok_or(GraphicsError::CreateShader(stage))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !compiled {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_shader(Some(&shader));
        return Err(InitError::ShaderCompile { stage, log });
    }

    Ok(shader)
}

/// Wrap and minification parameters for a sampling mode. Mipmapped
/// sampling restores the GL defaults the placeholder setup overrode.
fn sampling_parameters(sampling: TextureSampling) -> [(u32, i32); 3] {
    let (wrap, min_filter) = match sampling {
        TextureSampling::Mipmapped => (Gl::REPEAT, Gl::NEAREST_MIPMAP_LINEAR),
        TextureSampling::ClampLinear => (Gl::CLAMP_TO_EDGE, Gl::LINEAR),
    };
    [
        (Gl::TEXTURE_WRAP_S, wrap as i32),
        (Gl::TEXTURE_WRAP_T, wrap as i32),
        (Gl::TEXTURE_MIN_FILTER, min_filter as i32),
    ]
}

impl GraphicsDevice for WebGlDevice {
    type Buffer = WebGlBuffer;
    type Texture = WebGlTexture;
    type Program = WebGlProgram;
    type UniformLocation = WebGlUniformLocation;
    type Frame = MediaFrame;

    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<WebGlBuffer, GraphicsError> {
        self.array_buffer(Gl::ARRAY_BUFFER, &Float32Array::from(data))
    }

    fn create_index_buffer(&mut self, data: &[u16]) -> Result<WebGlBuffer, GraphicsError> {
        self.array_buffer(Gl::ELEMENT_ARRAY_BUFFER, &Uint16Array::from(data))
    }

    fn create_program(&mut self, sources: &ShaderSources) -> Result<WebGlProgram, InitError> {
        let gl = &self.gl;
        let vertex_shader = compile_shader(gl, ShaderStage::Vertex, &sources.vertex)?;
        let fragment_shader = compile_shader(gl, ShaderStage::Fragment, &sources.fragment)?;

        let program = gl.create_program().ok_or(GraphicsError::CreateProgram)?;
        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);

        let linked = gl
            .get_program_parameter(&program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl
                .get_program_info_log(&program)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(InitError::ProgramLink(log));
        }

        Ok(program)
    }

    fn attrib_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        u32::try_from(self.gl.get_attrib_location(program, name)).ok()
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn create_texture(&mut self) -> Result<WebGlTexture, GraphicsError> {
        self.gl.create_texture().ok_or(GraphicsError::CreateTexture)
    }

    fn set_unpack_flip_y(&mut self, flip: bool) {
        self.gl.pixel_storei(Gl::UNPACK_FLIP_Y_WEBGL, flip as i32);
    }

    fn upload_image(
        &mut self,
        texture: &WebGlTexture,
        image: &RgbaImage,
    ) -> Result<(), GraphicsError> {
        self.gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
        self.gl
            .tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
                Gl::TEXTURE_2D,
                0,
                Gl::RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                Some(&image.pixels),
            )
            .map_err(|e| GraphicsError::Upload(format!("{:?}", e)))
    }

    fn upload_frame(
        &mut self,
        texture: &WebGlTexture,
        frame: &MediaFrame,
    ) -> Result<(), GraphicsError> {
        let gl = &self.gl;
        gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
        let result = match frame {
            MediaFrame::Video(video) => gl.tex_image_2d_with_u32_and_u32_and_html_video_element(
                Gl::TEXTURE_2D,
                0,
                Gl::RGBA as i32,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                video,
            ),
            MediaFrame::Image(image) => gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                Gl::TEXTURE_2D,
                0,
                Gl::RGBA as i32,
                Gl::RGBA,
                Gl::UNSIGNED_BYTE,
                image,
            ),
        };
        result.map_err(|e| GraphicsError::Upload(format!("{:?}", e)))
    }

    fn set_sampling(&mut self, texture: &WebGlTexture, sampling: TextureSampling) {
        let gl = &self.gl;
        gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
        if sampling == TextureSampling::Mipmapped {
            gl.generate_mipmap(Gl::TEXTURE_2D);
        }
        for (parameter, value) in sampling_parameters(sampling) {
            gl.tex_parameteri(Gl::TEXTURE_2D, parameter, value);
        }
    }

    fn clear(&mut self, color: [f32; 4], depth: f32) {
        self.gl.clear_color(color[0], color[1], color[2], color[3]);
        self.gl.clear_depth(depth);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    fn enable_depth_test(&mut self) {
        self.gl.enable(Gl::DEPTH_TEST);
        self.gl.depth_func(Gl::LEQUAL);
    }

    fn bind_attribute(&mut self, buffer: &WebGlBuffer, location: u32, components: i32) {
        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        self.gl
            .vertex_attrib_pointer_with_i32(location, components, Gl::FLOAT, false, 0, 0);
        self.gl.enable_vertex_attrib_array(location);
    }

    fn bind_index_buffer(&mut self, buffer: &WebGlBuffer) {
        self.gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(buffer));
    }

    fn use_program(&mut self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn uniform_matrix4(&mut self, location: Option<&WebGlUniformLocation>, matrix: &[f32; 16]) {
        self.gl
            .uniform_matrix4fv_with_f32_array(location, false, matrix);
    }

    fn uniform_sampler(&mut self, location: Option<&WebGlUniformLocation>, unit: u32) {
        self.gl.uniform1i(location, unit as i32);
    }

    fn draw_triangles(&mut self, index_count: i32) {
        self.gl
            .draw_elements_with_i32(Gl::TRIANGLES, index_count, Gl::UNSIGNED_SHORT, 0);
    }

    fn bind_texture(&mut self, texture: &WebGlTexture, unit: u32) {
        self.gl.active_texture(Gl::TEXTURE0 + unit);
        self.gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
    }
}
