use bitflags::bitflags;

use crate::{GeometryBuffer, MeshError, SurfaceSize};

/// Largest vertex count addressable by a 16-bit index buffer.
const MAX_VERTICES: u64 = u16::MAX as u64 + 1;

bitflags! {
    /// Placement of a grid mesh relative to the surface.
    ///
    /// `TOP` pins the mesh's upper edge to the top of the surface and `LEFT`
    /// pins its left edge to the left of the surface. An axis without its flag
    /// is centered on the origin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Alignment: u8 {
        /// Pin to the top edge.
        const TOP = 0b01;
        /// Pin to the left edge.
        const LEFT = 0b10;
    }
}

impl Alignment {
    /// Centered on both axes.
    pub const CENTER: Self = Self::empty();
}

/// Builds a rectangular grid mesh subdivided into
/// `segments_by_width x segments_by_height` cells.
///
/// Every grid line becomes a row or column of vertices, giving
/// `(segments_by_width + 1) * (segments_by_height + 1)` vertices and two
/// triangles per cell.
///
/// ```
/// use gridgl_mesh::{Alignment, GridMeshBuilder, SurfaceSize};
///
/// let mesh = GridMeshBuilder::new(400.0, 300.0)
///     .segments(4, 3)
///     .texture_coords(true)
///     .alignment(Alignment::TOP | Alignment::LEFT)
///     .build(SurfaceSize::new(800, 600))
///     .unwrap();
///
/// assert_eq!(mesh.vertex_count(), 20);
/// assert_eq!(mesh.indices().len(), 72);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMeshBuilder {
    width: f32,
    height: f32,
    segments: (u32, u32),
    texture_coords: bool,
    alignment: Alignment,
}

impl GridMeshBuilder {
    /// Starts a centered, single-cell mesh of the given pixel size without
    /// texture coordinates.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            segments: (1, 1),
            texture_coords: false,
            alignment: Alignment::CENTER,
        }
    }

    /// Sets the number of cells along each axis. Zero is raised to one.
    #[must_use]
    pub fn segments(mut self, by_width: u32, by_height: u32) -> Self {
        self.segments = (by_width.max(1), by_height.max(1));
        self
    }

    /// Interleaves a `(u, v)` pair after each vertex position.
    #[must_use]
    pub fn texture_coords(mut self, enabled: bool) -> Self {
        self.texture_coords = enabled;
        self
    }

    /// Sets the placement; the default is [`Alignment::CENTER`].
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Generates the mesh for the given surface.
    ///
    /// # Errors
    /// * [`MeshError::EmptySurface`] - the surface has a zero dimension
    /// * [`MeshError::InvalidDimensions`] - width or height is NaN or infinite
    /// * [`MeshError::TooManyVertices`] - more than 65 536 vertices required
    pub fn build(&self, surface: SurfaceSize) -> Result<GridMesh, MeshError> {
        if surface.is_empty() {
            return Err(MeshError::EmptySurface { width: surface.width, height: surface.height });
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(MeshError::InvalidDimensions { width: self.width, height: self.height });
        }

        let (columns, rows) = self.segments;
        let vertex_count = (columns as u64 + 1) * (rows as u64 + 1);
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices { columns, rows, vertices: vertex_count });
        }

        let (width, height) = surface.to_ndc(self.width, self.height);
        let (surface_w, surface_h) = surface.to_ndc(surface.width as f32, surface.height as f32);

        let top_offset = if self.alignment.contains(Alignment::TOP) {
            height - surface_h / 2.0
        } else {
            height / 2.0
        };
        let left_offset = if self.alignment.contains(Alignment::LEFT) {
            surface_w / 2.0
        } else {
            width / 2.0
        };

        let components = if self.texture_coords { 4 } else { 2 };
        let mut vertices = Vec::with_capacity(vertex_count as usize * components);
        let (cols_f, rows_f) = (columns as f32, rows as f32);
        for y in 0..=rows {
            for x in 0..=columns {
                vertices.push(width / cols_f * x as f32 - left_offset);
                vertices.push(height / rows_f * y as f32 - top_offset);
                if self.texture_coords {
                    vertices.push(x as f32 / cols_f);
                    vertices.push(y as f32 / rows_f);
                }
            }
        }

        Ok(GridMesh {
            vertices,
            indices: grid_indices(columns, rows),
            texture_coords: self.texture_coords,
            segments: self.segments,
        })
    }
}

/// Two triangles per cell: `(i1, i2, i4)` and `(i2, i3, i4)`, with corners
/// `i1 = (x, y)`, `i2 = (x, y+1)`, `i3 = (x+1, y+1)` and `i4 = (x+1, y)`.
fn grid_indices(columns: u32, rows: u32) -> Vec<u16> {
    let row_len = columns + 1;
    let index = |x: u32, y: u32| (x + row_len * y) as u16;

    let mut indices = Vec::with_capacity((columns * rows * 6) as usize);
    for y in 0..rows {
        for x in 0..columns {
            let i1 = index(x, y);
            let i2 = index(x, y + 1);
            let i3 = index(x + 1, y + 1);
            let i4 = index(x + 1, y);
            indices.extend_from_slice(&[i1, i2, i4, i2, i3, i4]);
        }
    }
    indices
}

/// Output of [`GridMeshBuilder::build`]: interleaved vertex data and 16-bit
/// triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    vertices: Vec<f32>,
    indices: Vec<u16>,
    texture_coords: bool,
    segments: (u32, u32),
}

impl GridMesh {
    /// Interleaved `x, y[, u, v]` floats in normalized device coordinates.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// 16-bit triangle indices, six per cell.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Floats per vertex: 2, or 4 with texture coordinates.
    pub fn components_per_vertex(&self) -> usize {
        if self.texture_coords { 4 } else { 2 }
    }

    /// Number of vertices, `(columns + 1) * (rows + 1)`.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.components_per_vertex()
    }

    /// Whether each vertex carries a `(u, v)` pair after its position.
    pub fn has_texture_coords(&self) -> bool {
        self.texture_coords
    }

    /// Cells along the width and height, after clamping.
    pub fn segments(&self) -> (u32, u32) {
        self.segments
    }

    /// Hands the data over as `[vertices, indices]`, the order the upload and
    /// draw calls expect.
    pub fn into_buffers(self) -> [GeometryBuffer; 2] {
        [
            GeometryBuffer::Vertices(self.vertices),
            GeometryBuffer::Indices16(self.indices),
        ]
    }
}
