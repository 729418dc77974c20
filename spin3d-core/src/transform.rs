/// Rotation state machine and the explicitly owned model orientation
use nalgebra::{Matrix4, Vector3};

/// Whether the cube is currently spinning.
///
/// Starts paused; the toggle key flips between the two states. Pausing only
/// stops further increments, it never resets the accumulated orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spin {
    #[default]
    Paused,
    Rotating,
}

impl Spin {
    pub fn toggle(&mut self) {
        *self = match self {
            Spin::Paused => Spin::Rotating,
            Spin::Rotating => Spin::Paused,
        };
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, Spin::Rotating)
    }
}

/// Per-frame rotation parameters: a fixed axis plus the user-supplied angle
/// and speed scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSettings {
    pub axis: Vector3<f32>,
    pub angle: f32,
    pub speed: f32,
}

impl RotationSettings {
    /// The fixed rotation axis. Deliberately non-normalized; the orientation
    /// normalizes it before composing an increment.
    pub fn default_axis() -> Vector3<f32> {
        Vector3::new(3.0, 1.0, 1.0)
    }

    pub fn new(angle: f32, speed: f32) -> Self {
        Self {
            axis: Self::default_axis(),
            angle,
            speed,
        }
    }

    /// The angular step applied on each rotating frame, in degrees.
    pub fn step_degrees(&self) -> f32 {
        self.angle * self.speed
    }
}

/// The accumulated model orientation.
///
/// Each increment is composed onto the stored matrix, so rotation builds up
/// multiplicatively frame over frame and nothing ever resets it. This
/// replaces the implicit transform stack a fixed-function pipeline would
/// carry, keeping the state inspectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    matrix: Matrix4<f32>,
}

impl Orientation {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Compose one rotation of `degrees` about `axis` onto the current
    /// orientation. The axis may have any non-zero magnitude.
    pub fn rotate(&mut self, axis: Vector3<f32>, degrees: f32) {
        let axisangle = axis.normalize() * degrees.to_radians();
        self.matrix = Matrix4::new_rotation(axisangle) * self.matrix;
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_starts_paused_and_toggles() {
        let mut spin = Spin::default();
        assert!(!spin.is_rotating());
        spin.toggle();
        assert!(spin.is_rotating());
        spin.toggle();
        assert!(!spin.is_rotating());
    }

    #[test]
    fn axis_defaults_to_3_1_1() {
        let settings = RotationSettings::new(1.0, 1.0);
        assert_eq!(settings.axis, Vector3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn step_is_angle_times_speed() {
        assert!((RotationSettings::new(2.0, 1.0).step_degrees() - 2.0).abs() < 1e-6);
        assert!((RotationSettings::new(1.5, 3.0).step_degrees() - 4.5).abs() < 1e-6);
    }

    #[test]
    fn orientation_starts_at_identity() {
        let orientation = Orientation::identity();
        assert!((orientation.matrix() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn increments_accumulate() {
        let axis = RotationSettings::default_axis();

        let mut stepped = Orientation::identity();
        stepped.rotate(axis, 10.0);
        stepped.rotate(axis, 10.0);

        let mut direct = Orientation::identity();
        direct.rotate(axis, 20.0);

        assert!((stepped.matrix() - direct.matrix()).norm() < 1e-5);
    }

    #[test]
    fn full_turn_returns_home() {
        let mut orientation = Orientation::identity();
        for _ in 0..36 {
            orientation.rotate(RotationSettings::default_axis(), 10.0);
        }
        assert!((orientation.matrix() - Matrix4::identity()).norm() < 1e-4);
    }

    #[test]
    fn axis_magnitude_does_not_matter() {
        let mut a = Orientation::identity();
        a.rotate(Vector3::new(3.0, 1.0, 1.0), 15.0);

        let mut b = Orientation::identity();
        b.rotate(Vector3::new(6.0, 2.0, 2.0), 15.0);

        assert!((a.matrix() - b.matrix()).norm() < 1e-6);
    }
}
