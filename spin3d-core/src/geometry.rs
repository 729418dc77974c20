/// Cube geometry tables for indexed rendering
use nalgebra::Point3;

/// Index pairs for the twelve cube edges. Each pair joins two vertices that
/// differ in exactly one coordinate's sign.
pub const EDGES: [[u16; 2]; 12] = [
    // ring at z = -half
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    // ring at z = +half
    [4, 5],
    [5, 7],
    [7, 6],
    [6, 4],
    // verticals
    [0, 4],
    [1, 5],
    [2, 7],
    [3, 6],
];

/// Index quadruples for the six cube faces, wound consistently per face.
pub const FACES: [[u16; 4]; 6] = [
    [0, 1, 2, 3],
    [3, 2, 7, 6],
    [6, 7, 5, 4],
    [4, 5, 1, 0],
    [1, 5, 7, 2],
    [4, 0, 3, 6],
];

/// The eight cube vertices plus the fixed edge and face index tables.
///
/// The edge and face tables reference vertices positionally, so the vertex
/// enumeration order is part of the contract and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGeometry {
    pub vertices: Vec<Point3<f32>>,
    pub edges: [[u16; 2]; 12],
    pub faces: [[u16; 4]; 6],
}

impl CubeGeometry {
    /// Build the cube for a given edge length, centered on the origin.
    ///
    /// Vertices are placed at every combination of +/- half the size per
    /// axis. Non-positive sizes are accepted and simply produce a degenerate
    /// or inverted cube.
    pub fn new(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, -half, half),
            Point3::new(-half, half, half),
        ];

        Self {
            vertices,
            edges: EDGES,
            faces: FACES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_expected_element_counts() {
        let cube = CubeGeometry::new(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(cube.faces.len(), 6);
    }

    #[test]
    fn vertices_sit_at_half_size() {
        let cube = CubeGeometry::new(4.0);
        for vertex in &cube.vertices {
            for axis in 0..3 {
                assert!((vertex[axis].abs() - 2.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn vertices_cover_all_sign_combinations() {
        let cube = CubeGeometry::new(2.0);
        let mut signs: Vec<[bool; 3]> = cube
            .vertices
            .iter()
            .map(|v| [v.x > 0.0, v.y > 0.0, v.z > 0.0])
            .collect();
        signs.sort();
        signs.dedup();
        assert_eq!(signs.len(), 8);
    }

    #[test]
    fn edges_flip_exactly_one_sign() {
        let cube = CubeGeometry::new(2.0);
        for edge in &cube.edges {
            let a = cube.vertices[edge[0] as usize];
            let b = cube.vertices[edge[1] as usize];
            let mut differing = 0;
            for axis in 0..3 {
                if (a[axis] - b[axis]).abs() > 1e-6 {
                    differing += 1;
                    // The two endpoints mirror each other on this axis
                    assert!((a[axis] + b[axis]).abs() < 1e-6);
                }
            }
            assert_eq!(differing, 1, "edge {:?} is not axis-aligned", edge);
        }
    }

    #[test]
    fn faces_lie_on_axis_aligned_planes() {
        let cube = CubeGeometry::new(3.0);
        for face in &cube.faces {
            let corners: Vec<_> = face.iter().map(|&i| cube.vertices[i as usize]).collect();
            let plane_axis = (0..3).find(|&axis| {
                corners
                    .iter()
                    .all(|p| (p[axis] - corners[0][axis]).abs() < 1e-6)
            });
            let axis = plane_axis.unwrap_or_else(|| panic!("face {:?} is not planar", face));
            assert!((corners[0][axis].abs() - 1.5).abs() < 1e-6);
        }
    }

    #[test]
    fn builder_is_deterministic() {
        assert_eq!(CubeGeometry::new(2.5), CubeGeometry::new(2.5));
    }

    #[test]
    fn zero_size_collapses_to_origin() {
        let cube = CubeGeometry::new(0.0);
        assert_eq!(cube.vertices.len(), 8);
        for vertex in &cube.vertices {
            assert_eq!(*vertex, Point3::new(0.0, 0.0, 0.0));
        }
    }
}
