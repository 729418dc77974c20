//! spin3d core library - stateless cube geometry and math
//!
//! This library provides the pure functionality behind the rotating cube
//! demo: cube geometry tables, color parsing, the accumulated model
//! orientation, and the camera projection. It performs no I/O.

pub mod color;
pub mod geometry;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use color::{face_colors, Color};
pub use geometry::CubeGeometry;
pub use projection::Camera;
pub use transform::{Orientation, RotationSettings, Spin};
