/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Camera configuration for 3D rendering.
///
/// Defaults replicate the demo's classic setup: a 45 degree perspective
/// projection with the eye five units back on the +z axis, looking at the
/// origin.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 50.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
