//! Recording doubles for the collaborator traits

#![allow(dead_code)]

use std::collections::VecDeque;

use vidcube_core::{
    DisplaySurface, FatalReporter, GraphicsDevice, GraphicsError, InitError, RgbaImage,
    ShaderSources, TextureSampling, VideoEvent, VideoSource, Viewport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateBuffer { id: usize, len: usize },
    CreateProgram,
    CreateTexture { id: usize },
    FlipY(bool),
    UploadImage { texture: usize, image: RgbaImage },
    UploadFrame { texture: usize, frame: u32 },
    Sampling { texture: usize, sampling: TextureSampling },
    Clear,
    DepthTest,
    BindAttribute { buffer: usize, location: u32, components: i32 },
    BindIndices { buffer: usize },
    UseProgram,
    UniformMatrix { name: &'static str, matrix: [f32; 16] },
    UniformSampler { unit: u32 },
    Draw { count: i32 },
    BindTexture { texture: usize, unit: u32 },
}

/// Graphics device that records every call and tracks texture contents
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub commands: Vec<Command>,
    pub textures: Vec<RgbaImage>,
    pub fail_link: bool,
    pub fail_upload: bool,
    pub missing_attribute: Option<&'static str>,
    next_buffer: usize,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    pub fn failing_upload() -> Self {
        Self {
            fail_upload: true,
            ..Self::default()
        }
    }

    pub fn without_attribute(name: &'static str) -> Self {
        Self {
            missing_attribute: Some(name),
            ..Self::default()
        }
    }

    pub fn draw_calls(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Draw { .. }))
            .count()
    }

    pub fn frame_uploads(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::UploadFrame { .. }))
            .count()
    }
}

impl GraphicsDevice for RecordingDevice {
    type Buffer = usize;
    type Texture = usize;
    type Program = ();
    type UniformLocation = &'static str;
    /// Frame number, stands in for the decoded video picture
    type Frame = u32;

    fn create_vertex_buffer(&mut self, data: &[f32]) -> Result<usize, GraphicsError> {
        let id = self.next_buffer;
        self.next_buffer += 1;
        self.commands.push(Command::CreateBuffer { id, len: data.len() });
        Ok(id)
    }

    fn create_index_buffer(&mut self, data: &[u16]) -> Result<usize, GraphicsError> {
        let id = self.next_buffer;
        self.next_buffer += 1;
        self.commands.push(Command::CreateBuffer { id, len: data.len() });
        Ok(id)
    }

    fn create_program(&mut self, _sources: &ShaderSources) -> Result<(), InitError> {
        if self.fail_link {
            return Err(InitError::ProgramLink("simulated link failure".to_string()));
        }
        self.commands.push(Command::CreateProgram);
        Ok(())
    }

    fn attrib_location(&self, _program: &(), name: &str) -> Option<u32> {
        if self.missing_attribute.map_or(false, |missing| missing == name) {
            return None;
        }
        match name {
            "aVertexPosition" => Some(0),
            "aVertexNormal" => Some(1),
            "aTextureCoord" => Some(2),
            _ => None,
        }
    }

    fn uniform_location(&self, _program: &(), name: &str) -> Option<&'static str> {
        [
            "uProjectionMatrix",
            "uModelViewMatrix",
            "uNormalMatrix",
            "uSampler",
        ]
        .into_iter()
        .find(|candidate| *candidate == name)
    }

    fn create_texture(&mut self) -> Result<usize, GraphicsError> {
        let id = self.textures.len();
        self.textures.push(RgbaImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        });
        self.commands.push(Command::CreateTexture { id });
        Ok(id)
    }

    fn set_unpack_flip_y(&mut self, flip: bool) {
        self.commands.push(Command::FlipY(flip));
    }

    fn upload_image(&mut self, texture: &usize, image: &RgbaImage) -> Result<(), GraphicsError> {
        self.textures[*texture] = image.clone();
        self.commands.push(Command::UploadImage {
            texture: *texture,
            image: image.clone(),
        });
        Ok(())
    }

    fn upload_frame(&mut self, texture: &usize, frame: &u32) -> Result<(), GraphicsError> {
        if self.fail_upload {
            return Err(GraphicsError::Upload("simulated upload failure".to_string()));
        }
        // 2x1 frame whose red channel carries the frame number
        let tag = *frame as u8;
        self.textures[*texture] = RgbaImage {
            width: 2,
            height: 1,
            pixels: vec![tag, 0, 0, 255, tag, 0, 0, 255],
        };
        self.commands.push(Command::UploadFrame {
            texture: *texture,
            frame: *frame,
        });
        Ok(())
    }

    fn set_sampling(&mut self, texture: &usize, sampling: TextureSampling) {
        self.commands.push(Command::Sampling {
            texture: *texture,
            sampling,
        });
    }

    fn clear(&mut self, _color: [f32; 4], _depth: f32) {
        self.commands.push(Command::Clear);
    }

    fn enable_depth_test(&mut self) {
        self.commands.push(Command::DepthTest);
    }

    fn bind_attribute(&mut self, buffer: &usize, location: u32, components: i32) {
        self.commands.push(Command::BindAttribute {
            buffer: *buffer,
            location,
            components,
        });
    }

    fn bind_index_buffer(&mut self, buffer: &usize) {
        self.commands.push(Command::BindIndices { buffer: *buffer });
    }

    fn use_program(&mut self, _program: &()) {
        self.commands.push(Command::UseProgram);
    }

    fn uniform_matrix4(&mut self, location: Option<&&'static str>, matrix: &[f32; 16]) {
        if let Some(name) = location {
            self.commands.push(Command::UniformMatrix {
                name: *name,
                matrix: *matrix,
            });
        }
    }

    fn uniform_sampler(&mut self, location: Option<&&'static str>, unit: u32) {
        if location.is_some() {
            self.commands.push(Command::UniformSampler { unit });
        }
    }

    fn draw_triangles(&mut self, index_count: i32) {
        self.commands.push(Command::Draw { count: index_count });
    }

    fn bind_texture(&mut self, texture: &usize, unit: u32) {
        self.commands.push(Command::BindTexture {
            texture: *texture,
            unit,
        });
    }
}

/// Video source fed by the test, one frame number per tick
#[derive(Debug, Default)]
pub struct ScriptedVideo {
    pub pending: Vec<VideoEvent>,
    pub frame: u32,
    pub still: bool,
}

impl ScriptedVideo {
    pub fn push(&mut self, event: VideoEvent) {
        self.pending.push(event);
    }
}

impl VideoSource for ScriptedVideo {
    type Frame = u32;

    fn drain_events(&mut self) -> Vec<VideoEvent> {
        std::mem::take(&mut self.pending)
    }

    fn current_frame(&self) -> &u32 {
        &self.frame
    }

    fn sampling(&self) -> TextureSampling {
        if self.still {
            TextureSampling::Mipmapped
        } else {
            TextureSampling::for_video()
        }
    }

    fn is_still(&self) -> bool {
        self.still
    }
}

/// Surface that replays a fixed list of refresh timestamps
pub struct ScriptedSurface {
    pub viewport: Viewport,
    pub timestamps: VecDeque<f64>,
}

impl ScriptedSurface {
    pub fn new(width: u32, height: u32, timestamps: &[f64]) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            timestamps: timestamps.iter().copied().collect(),
        }
    }
}

impl DisplaySurface for ScriptedSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn next_frame(&mut self) -> Option<f64> {
        self.timestamps.pop_front()
    }
}

#[derive(Debug, Default)]
pub struct CountingReporter {
    pub reports: Vec<String>,
}

impl FatalReporter for CountingReporter {
    fn report(&mut self, error: &InitError) {
        self.reports.push(error.to_string());
    }
}
