/// Per-frame projection, model-view and normal matrices
use std::f64::consts::TAU;

use nalgebra::{Matrix4, Perspective3, Vector3};

use crate::config::{CameraConfig, ProjectionConfig};
use crate::error::TransformError;

/// Drawable size of the display surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> Result<f32, TransformError> {
        let aspect = self.width as f32 / self.height as f32;
        if self.width == 0 || self.height == 0 || !aspect.is_finite() {
            return Err(TransformError::DegenerateViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(aspect)
    }
}

/// The three matrices uploaded to the shader each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub projection: Matrix4<f32>,
    pub model_view: Matrix4<f32>,
    pub normal: Matrix4<f32>,
}

/// Transform builder for the spinning cube
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTransform {
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
}

impl FrameTransform {
    pub fn new(projection: ProjectionConfig, camera: CameraConfig) -> Self {
        Self { projection, camera }
    }

    /// Perspective projection for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        Perspective3::new(
            aspect,
            self.projection.fov_y,
            self.projection.near,
            self.projection.far,
        )
        .to_homogeneous()
    }

    /// Push the cube away from the camera, then spin it about Z, Y and X.
    ///
    /// Each rotation is post-multiplied onto the running matrix, so the
    /// result is `T * Rz * Ry * Rx`. The order matters.
    pub fn model_view_matrix(&self, rotation: f64) -> Matrix4<f32> {
        let [rate_z, rate_y, rate_x] = self.camera.rotation_rates;
        let (z, y, x) = (
            axis_angle(rotation, rate_z),
            axis_angle(rotation, rate_y),
            axis_angle(rotation, rate_x),
        );

        let mut model_view = Matrix4::identity();
        model_view *= Matrix4::new_translation(&self.camera.offset);
        model_view *= Matrix4::new_rotation(Vector3::new(0.0, 0.0, z));
        model_view *= Matrix4::new_rotation(Vector3::new(0.0, y, 0.0));
        model_view *= Matrix4::new_rotation(Vector3::new(x, 0.0, 0.0));
        model_view
    }

    /// Inverse-transpose of the model-view matrix
    pub fn normal_matrix(model_view: &Matrix4<f32>) -> Result<Matrix4<f32>, TransformError> {
        model_view
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .ok_or(TransformError::SingularModelView)
    }

    /// Compute all three matrices for one frame
    pub fn compute(
        &self,
        rotation: f64,
        viewport: Viewport,
    ) -> Result<FrameMatrices, TransformError> {
        let aspect = viewport.aspect_ratio()?;
        let model_view = self.model_view_matrix(rotation);
        Ok(FrameMatrices {
            projection: self.projection_matrix(aspect),
            normal: Self::normal_matrix(&model_view)?,
            model_view,
        })
    }
}

/// Angle for one axis, wrapped into [0, 2π) before narrowing to f32
fn axis_angle(rotation: f64, rate: f32) -> f32 {
    (rotation * f64::from(rate)).rem_euclid(TAU) as f32
}

/// Column-major copy of a matrix, the layout uniform uploads expect
pub fn to_column_array(matrix: &Matrix4<f32>) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(matrix.as_slice());
    out
}
