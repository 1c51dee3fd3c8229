//! Geometry for the gridgl renderer: pixel to device-coordinate conversion,
//! tagged geometry buffers and a procedural planar grid mesh generator.
//!
//! Nothing in this crate touches the GPU; the buffers it produces are handed
//! to `gridgl-core` for upload and drawing.

mod coordinate;
mod geometry;
mod mesh;

pub use coordinate::SurfaceSize;
pub use geometry::GeometryBuffer;
pub use mesh::{Alignment, GridMesh, GridMeshBuilder};

/// Errors raised while generating a mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The target surface has a zero width or height.
    #[error("surface has no area: {width}x{height}")]
    EmptySurface {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },

    /// The requested mesh width or height is not a finite number.
    #[error("invalid mesh dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested mesh width.
        width: f32,
        /// Requested mesh height.
        height: f32,
    },

    /// The grid needs more vertices than a 16-bit index buffer can address.
    #[error(
        "{columns}x{rows} segments need {vertices} vertices, more than 16-bit indices can address"
    )]
    TooManyVertices {
        /// Segments along the x axis.
        columns: u32,
        /// Segments along the y axis.
        rows: u32,
        /// Vertices the grid would need.
        vertices: u64,
    },
}
