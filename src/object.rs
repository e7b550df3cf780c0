use std::mem::size_of;

pub const POSITION : u32 = 0;
pub const COLOR : u32 = 1;
pub const TEX_COORD : u32 = 2;

/// One attribute of an interleaved vertex, bound at `location` in the
/// vertex shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub location : u32,
    pub components : usize,
}

impl Attribute {
    pub const fn new(location : u32, components : usize) -> Self {
        Self{ location, components }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LoadedMesh {
    pub(crate) vao : glow::NativeVertexArray,
    pub(crate) vbo : glow::NativeBuffer,
    pub(crate) ebo : Option<glow::NativeBuffer>,
    pub(crate) count : usize,
}

/// Interleaved vertex data: every vertex is the concatenation of its
/// attributes, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices : Vec<f32>,
    pub attributes : Vec<Attribute>,
    pub indices : Option<Vec<u32>>,
}

impl Mesh {
    pub fn floats_per_vertex(&self) -> usize {
        self.attributes.iter().map(|a| a.components).sum()
    }

    /// bytes between consecutive vertices
    pub fn stride(&self) -> usize {
        self.floats_per_vertex() * size_of::<f32>()
    }

    /// Each attribute with its byte offset inside a vertex.
    pub fn layout(&self) -> Vec<(Attribute, usize)> {
        let mut offset = 0;

        self.attributes
            .iter()
            .map(|a| {
                let ret = (*a, offset);
                offset += a.components * size_of::<f32>();
                ret
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        match self.floats_per_vertex() {
            0 => 0,
            n => self.vertices.len() / n,
        }
    }

    /// Number of elements passed to the draw call.
    pub fn draw_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }

    pub fn triangle() -> Self {
        #[rustfmt::skip]
        const VERTICES : [f32; 18] = [
            // position       // color
            -0.5, -0.5, 0.0,  1.0, 0.0, 0.0,
             0.5, -0.5, 0.0,  0.0, 1.0, 0.0,
             0.0,  0.5, 0.0,  0.0, 0.0, 1.0,
        ];

        Mesh{
            vertices : VERTICES.to_vec(),
            attributes : vec![
                Attribute::new(POSITION, 3),
                Attribute::new(COLOR, 3),
            ],
            indices : None,
        }
    }

    pub fn quad() -> Self {
        #[rustfmt::skip]
        const VERTICES : [f32; 24] = [
            // position       // color
             0.5,  0.5, 0.0,  1.0, 0.0, 0.0, // top right
             0.5, -0.5, 0.0,  0.0, 1.0, 0.0, // bottom right
            -0.5, -0.5, 0.0,  0.0, 0.0, 1.0, // bottom left
            -0.5,  0.5, 0.0,  1.0, 1.0, 0.0, // top left
        ];

        Mesh{
            vertices : VERTICES.to_vec(),
            attributes : vec![
                Attribute::new(POSITION, 3),
                Attribute::new(COLOR, 3),
            ],
            indices : Some(QUAD_INDICES.to_vec()),
        }
    }

    pub fn textured_quad() -> Self {
        #[rustfmt::skip]
        const VERTICES : [f32; 32] = [
            // position       // color        // tex coord
             0.5,  0.5, 0.0,  1.0, 0.0, 0.0,  1.0, 1.0,
             0.5, -0.5, 0.0,  0.0, 1.0, 0.0,  1.0, 0.0,
            -0.5, -0.5, 0.0,  0.0, 0.0, 1.0,  0.0, 0.0,
            -0.5,  0.5, 0.0,  1.0, 1.0, 0.0,  0.0, 1.0,
        ];

        Mesh{
            vertices : VERTICES.to_vec(),
            attributes : vec![
                Attribute::new(POSITION, 3),
                Attribute::new(COLOR, 3),
                Attribute::new(TEX_COORD, 2),
            ],
            indices : Some(QUAD_INDICES.to_vec()),
        }
    }

    /// Unit cube centred on the origin, 6 vertices per face so every face
    /// gets its own texture coordinates.
    pub fn textured_cube() -> Self {
        #[rustfmt::skip]
        const VERTICES : [f32; 180] = [
            // position         // tex coord
            -0.5, -0.5, -0.5,  0.0, 0.0,
             0.5, -0.5, -0.5,  1.0, 0.0,
             0.5,  0.5, -0.5,  1.0, 1.0,
             0.5,  0.5, -0.5,  1.0, 1.0,
            -0.5,  0.5, -0.5,  0.0, 1.0,
            -0.5, -0.5, -0.5,  0.0, 0.0,

            -0.5, -0.5,  0.5,  0.0, 0.0,
             0.5, -0.5,  0.5,  1.0, 0.0,
             0.5,  0.5,  0.5,  1.0, 1.0,
             0.5,  0.5,  0.5,  1.0, 1.0,
            -0.5,  0.5,  0.5,  0.0, 1.0,
            -0.5, -0.5,  0.5,  0.0, 0.0,

            -0.5,  0.5,  0.5,  1.0, 0.0,
            -0.5,  0.5, -0.5,  1.0, 1.0,
            -0.5, -0.5, -0.5,  0.0, 1.0,
            -0.5, -0.5, -0.5,  0.0, 1.0,
            -0.5, -0.5,  0.5,  0.0, 0.0,
            -0.5,  0.5,  0.5,  1.0, 0.0,

             0.5,  0.5,  0.5,  1.0, 0.0,
             0.5,  0.5, -0.5,  1.0, 1.0,
             0.5, -0.5, -0.5,  0.0, 1.0,
             0.5, -0.5, -0.5,  0.0, 1.0,
             0.5, -0.5,  0.5,  0.0, 0.0,
             0.5,  0.5,  0.5,  1.0, 0.0,

            -0.5, -0.5, -0.5,  0.0, 1.0,
             0.5, -0.5, -0.5,  1.0, 1.0,
             0.5, -0.5,  0.5,  1.0, 0.0,
             0.5, -0.5,  0.5,  1.0, 0.0,
            -0.5, -0.5,  0.5,  0.0, 0.0,
            -0.5, -0.5, -0.5,  0.0, 1.0,

            -0.5,  0.5, -0.5,  0.0, 1.0,
             0.5,  0.5, -0.5,  1.0, 1.0,
             0.5,  0.5,  0.5,  1.0, 0.0,
             0.5,  0.5,  0.5,  1.0, 0.0,
            -0.5,  0.5,  0.5,  0.0, 0.0,
            -0.5,  0.5, -0.5,  0.0, 1.0,
        ];

        Mesh{
            vertices : VERTICES.to_vec(),
            attributes : vec![
                Attribute::new(POSITION, 3),
                Attribute::new(TEX_COORD, 2),
            ],
            indices : None,
        }
    }
}

// two triangles sharing the top-right/bottom-left diagonal
const QUAD_INDICES : [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cube_layout() {
        let cube = Mesh::textured_cube();

        assert_eq!(cube.floats_per_vertex(), 5);
        assert_eq!(cube.stride(), 20);
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.draw_count(), 36);
        assert_eq!(cube.layout(), vec![
            (Attribute::new(POSITION, 3), 0),
            (Attribute::new(TEX_COORD, 2), 12),
        ]);
    }

    #[test]
    fn textured_quad_layout() {
        let quad = Mesh::textured_quad();

        assert_eq!(quad.stride(), 32);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.draw_count(), 6);
        assert_eq!(
            quad.layout().iter().map(|(_, o)| *o).collect::<Vec<_>>(),
            vec![0, 12, 24],
        );
    }

    #[test]
    fn indices_in_range() {
        for mesh in [Mesh::quad(), Mesh::textured_quad()] {
            let n = mesh.vertex_count() as u32;
            let indices = mesh.indices.as_ref().unwrap();

            assert_eq!(indices.len() % 3, 0);
            assert!(indices.iter().all(|i| *i < n));
        }
    }

    #[test]
    fn triangle_has_no_indices() {
        let tri = Mesh::triangle();

        assert_eq!(tri.vertex_count(), 3);
        assert_eq!(tri.draw_count(), 3);
    }

    #[test]
    fn empty_layout() {
        let mesh = Mesh{
            vertices : vec![],
            attributes : vec![],
            indices : None,
        };

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.stride(), 0);
    }
}
