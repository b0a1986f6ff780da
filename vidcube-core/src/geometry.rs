/// Static cube geometry uploaded once at startup
use nalgebra::{Point2, Point3, Vector3};

pub const FACE_COUNT: usize = 6;
pub const VERTICES_PER_FACE: usize = 4;
pub const VERTEX_COUNT: usize = FACE_COUNT * VERTICES_PER_FACE;
pub const INDEX_COUNT: usize = FACE_COUNT * 6;

/// Components per attribute, as bound to the shader
pub const POSITION_COMPONENTS: i32 = 3;
pub const NORMAL_COMPONENTS: i32 = 3;
pub const TEX_COORD_COMPONENTS: i32 = 2;

/// A cube face, in the order faces appear in the vertex streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Right,
    Left,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Right,
        Face::Left,
    ];

    pub fn normal(self) -> Vector3<f32> {
        match self {
            Face::Front => Vector3::new(0.0, 0.0, 1.0),
            Face::Back => Vector3::new(0.0, 0.0, -1.0),
            Face::Top => Vector3::new(0.0, 1.0, 0.0),
            Face::Bottom => Vector3::new(0.0, -1.0, 0.0),
            Face::Right => Vector3::new(1.0, 0.0, 0.0),
            Face::Left => Vector3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Corners of the face, counter-clockwise seen from outside the cube
    fn corners(self, half: f32) -> [[f32; 3]; VERTICES_PER_FACE] {
        let h = half;
        match self {
            Face::Front => [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]],
            Face::Back => [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]],
            Face::Top => [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]],
            Face::Bottom => [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]],
            Face::Right => [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]],
            Face::Left => [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]],
        }
    }

    /// The face that owns the given vertex index
    pub fn of_vertex(index: usize) -> Option<Face> {
        Face::ALL.get(index / VERTICES_PER_FACE).copied()
    }
}

/// Every face maps the full texture onto its four corners
const FACE_TEX_COORDS: [[f32; 2]; VERTICES_PER_FACE] =
    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Fan split of a quad into two triangles, relative to its first vertex
const FACE_TRIANGLES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A 3D vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub tex_coord: Point2<f32>,
}

/// A triangle as three indices into the vertex streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [u16; 3],
}

/// Cube vertex data stored as parallel flat streams, ready for upload.
///
/// Faces do not share vertices since each face has its own normal and
/// texture mapping.
#[derive(Debug, Clone)]
pub struct CubeGeometry {
    positions: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u16>,
}

impl CubeGeometry {
    /// Build a cube with edges of length `size`, centered on the origin
    pub fn new(size: f32) -> Self {
        let half = size / 2.0;
        let mut positions = Vec::with_capacity(VERTEX_COUNT * 3);
        let mut normals = Vec::with_capacity(VERTEX_COUNT * 3);
        let mut tex_coords = Vec::with_capacity(VERTEX_COUNT * 2);
        let mut indices = Vec::with_capacity(INDEX_COUNT);

        for (face_index, face) in Face::ALL.iter().enumerate() {
            let normal = face.normal();
            for (corner, uv) in face.corners(half).iter().zip(FACE_TEX_COORDS.iter()) {
                positions.extend_from_slice(corner);
                normals.extend_from_slice(normal.as_slice());
                tex_coords.extend_from_slice(uv);
            }

            let base = (face_index * VERTICES_PER_FACE) as u16;
            indices.extend(FACE_TRIANGLES.iter().map(|i| base + i));
        }

        Self {
            positions,
            normals,
            tex_coords,
            indices,
        }
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS as usize
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Gather the attributes of one vertex from the parallel streams
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        if index >= self.vertex_count() {
            return None;
        }
        let p = &self.positions[index * 3..index * 3 + 3];
        let n = &self.normals[index * 3..index * 3 + 3];
        let t = &self.tex_coords[index * 2..index * 2 + 2];
        Some(Vertex {
            position: Point3::new(p[0], p[1], p[2]),
            normal: Vector3::new(n[0], n[1], n[2]),
            tex_coord: Point2::new(t[0], t[1]),
        })
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|c| Triangle {
            indices: [c[0], c[1], c[2]],
        })
    }

    /// Geometric normal of a triangle from its winding
    pub fn triangle_normal(&self, triangle: &Triangle) -> Option<Vector3<f32>> {
        let v0 = self.vertex(triangle.indices[0] as usize)?.position;
        let v1 = self.vertex(triangle.indices[1] as usize)?.position;
        let v2 = self.vertex(triangle.indices[2] as usize)?.position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Some(edge1.cross(&edge2).normalize())
    }
}

impl Default for CubeGeometry {
    fn default() -> Self {
        Self::new(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let cube = CubeGeometry::default();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert_eq!(cube.normals().len(), 72);
        assert_eq!(cube.tex_coords().len(), 48);
    }

    #[test]
    fn test_indices_in_range() {
        let cube = CubeGeometry::default();
        assert!(cube.indices().iter().all(|&i| (i as usize) < VERTEX_COUNT));
    }

    #[test]
    fn test_each_face_has_two_triangles() {
        let cube = CubeGeometry::default();
        let mut per_face = [0usize; FACE_COUNT];
        for triangle in cube.triangles() {
            let face = Face::of_vertex(triangle.indices[0] as usize).unwrap();
            // all three corners on the same face
            for &i in &triangle.indices {
                assert_eq!(Face::of_vertex(i as usize), Some(face));
            }
            let slot = Face::ALL.iter().position(|f| *f == face).unwrap();
            per_face[slot] += 1;
        }
        assert_eq!(per_face, [2; FACE_COUNT]);
    }

    #[test]
    fn test_winding_faces_outward() {
        let cube = CubeGeometry::default();
        for triangle in cube.triangles() {
            let face = Face::of_vertex(triangle.indices[0] as usize).unwrap();
            let normal = cube.triangle_normal(&triangle).unwrap();
            assert!((normal - face.normal()).norm() < 1e-6, "{:?}", face);
        }
    }

    #[test]
    fn test_cube_bounds() {
        let cube = CubeGeometry::default();
        assert!(cube.positions().iter().all(|c| c.abs() == 1.0));
    }

    #[test]
    fn test_vertex_attributes() {
        let cube = CubeGeometry::default();
        let v = cube.vertex(6).unwrap();
        assert_eq!(v.position, Point3::new(1.0, 1.0, -1.0));
        assert_eq!(v.normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(v.tex_coord, Point2::new(1.0, 1.0));
        assert!(cube.vertex(24).is_none());

        for i in 0..VERTEX_COUNT {
            let v = cube.vertex(i).unwrap();
            assert!((v.normal.norm() - 1.0).abs() < 1e-6);
        }
    }
}
