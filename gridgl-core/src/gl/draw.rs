use glow::HasContext;
use gridgl_mesh::GeometryBuffer;

use crate::error::Error;

/// Shape of a triangle draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    /// Non-indexed draw over `count` vertices.
    Arrays {
        /// Vertices to draw.
        count: i32,
    },
    /// Indexed draw over `count` indices of `index_type`.
    Elements {
        /// Indices to draw.
        count: i32,
        /// `UNSIGNED_BYTE` or `UNSIGNED_SHORT`.
        index_type: u32,
    },
}

impl DrawCall {
    /// Picks the draw call for a geometry set.
    ///
    /// The second buffer decides the shape when present (normally the index
    /// buffer), otherwise the first. A vertex buffer gives a non-indexed draw
    /// over `len / components_per_vertex` vertices; an index buffer gives an
    /// indexed draw over all of its indices.
    pub fn plan(buffers: &[GeometryBuffer], components_per_vertex: usize) -> Result<Self, Error> {
        let shape = buffers
            .get(1)
            .or_else(|| buffers.first())
            .ok_or_else(Error::no_geometry)?;

        match shape {
            GeometryBuffer::Vertices(data) => {
                if components_per_vertex == 0 {
                    return Err(Error::no_vertex_components(data.len()));
                }
                Ok(Self::Arrays { count: (data.len() / components_per_vertex) as i32 })
            },
            GeometryBuffer::Indices8(data) => Ok(Self::Elements {
                count: data.len() as i32,
                index_type: glow::UNSIGNED_BYTE,
            }),
            GeometryBuffer::Indices16(data) => Ok(Self::Elements {
                count: data.len() as i32,
                index_type: glow::UNSIGNED_SHORT,
            }),
        }
    }

    /// Number of vertices or indices consumed.
    pub fn count(&self) -> i32 {
        match self {
            Self::Arrays { count } | Self::Elements { count, .. } => *count,
        }
    }

    pub(crate) fn issue(&self, gl: &glow::Context) {
        unsafe {
            match *self {
                Self::Arrays { count } => gl.draw_arrays(glow::TRIANGLES, 0, count),
                Self::Elements { count, index_type } => {
                    gl.draw_elements(glow::TRIANGLES, count, index_type, 0)
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_only_draw_arrays() {
        let buffers = [GeometryBuffer::Vertices(vec![0.0; 12])];
        assert_eq!(DrawCall::plan(&buffers, 2).unwrap(), DrawCall::Arrays { count: 6 });
    }

    #[test]
    fn index_buffer_draws_elements() {
        let buffers = [
            GeometryBuffer::Vertices(vec![0.0; 12]),
            GeometryBuffer::Indices16(vec![0, 1, 2, 2, 3, 0]),
        ];
        assert_eq!(
            DrawCall::plan(&buffers, 2).unwrap(),
            DrawCall::Elements { count: 6, index_type: glow::UNSIGNED_SHORT }
        );
    }

    #[test]
    fn byte_indices_use_byte_type() {
        let buffers = [
            GeometryBuffer::Vertices(vec![0.0; 8]),
            GeometryBuffer::Indices8(vec![0, 1, 2]),
        ];
        assert_eq!(
            DrawCall::plan(&buffers, 2).unwrap(),
            DrawCall::Elements { count: 3, index_type: glow::UNSIGNED_BYTE }
        );
    }

    #[test]
    fn interleaved_uv_halves_vertex_count() {
        let buffers = [GeometryBuffer::Vertices(vec![0.0; 24])];
        assert_eq!(DrawCall::plan(&buffers, 4).unwrap().count(), 6);
    }

    #[test]
    fn second_buffer_decides_even_when_vertices() {
        let buffers = [
            GeometryBuffer::Indices16(vec![0, 1, 2]),
            GeometryBuffer::Vertices(vec![0.0; 10]),
        ];
        assert_eq!(DrawCall::plan(&buffers, 2).unwrap(), DrawCall::Arrays { count: 5 });
    }

    #[test]
    fn nothing_to_draw() {
        assert!(matches!(
            DrawCall::plan(&[], 2),
            Err(Error::UnsupportedDataKind(_))
        ));
        assert!(matches!(
            DrawCall::plan(&[GeometryBuffer::Vertices(vec![0.0; 4])], 0),
            Err(Error::UnsupportedDataKind(_))
        ));
    }
}
