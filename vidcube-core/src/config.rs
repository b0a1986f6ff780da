/// Compiled-in scene configuration
use nalgebra::Vector3;

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::PI / 4.0, // 45 degrees
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Fixed camera placement and the per-axis spin rates of the cube.
///
/// `rotation_rates` scales the accumulated rotation for the Z, Y and X
/// axes respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub offset: Vector3<f32>,
    pub rotation_rates: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vector3::new(0.0, 0.0, -6.0),
            rotation_rates: [1.0, 0.7, 0.3],
        }
    }
}

/// Ambient + single directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingConfig {
    pub ambient: Vector3<f32>,
    pub directional_color: Vector3<f32>,
    /// Unnormalized; consumers normalize it.
    pub direction: Vector3<f32>,
}

impl LightingConfig {
    pub fn light_direction(&self) -> Vector3<f32> {
        self.direction.normalize()
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.3, 0.3, 0.3),
            directional_color: Vector3::new(1.0, 1.0, 1.0),
            direction: Vector3::new(0.85, 0.8, 0.75),
        }
    }
}

/// Everything the renderer and frame driver need to know up front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub clear_color: [f32; 4],
    pub clear_depth: f32,
    /// Shown until the first real frame is uploaded (opaque blue).
    pub placeholder_pixel: [u8; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
            placeholder_pixel: [0, 0, 255, 255],
        }
    }
}
