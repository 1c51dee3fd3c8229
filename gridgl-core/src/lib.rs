//! Immediate-style rendering over [`glow`]: compile shader programs, upload
//! geometry, bind attributes and uniforms, create 2D textures and issue draw
//! calls against one GL context.
//!
//! Geometry comes from [`gridgl_mesh`], re-exported here:
//!
//! ```no_run
//! use gridgl_core::{
//!     AttributeLayout, ClearColor, ContextConfig, GridMeshBuilder, RenderingContext,
//!     SurfaceSize,
//! };
//!
//! # fn run(gl: glow::Context, vertex: &str, fragment: &str) -> Result<(), gridgl_core::Error> {
//! let surface = SurfaceSize::new(800, 600);
//! let mut ctx = RenderingContext::new(gl, surface, ContextConfig::default())?;
//!
//! let mesh = GridMeshBuilder::new(800.0, 600.0)
//!     .segments(8, 6)
//!     .build(surface)?;
//! let buffers = mesh.into_buffers();
//! let layout = AttributeLayout::new().with("a_position", 2);
//!
//! let program = ctx.create_shader_program(vertex, fragment)?;
//! ctx.upload_geometry(&buffers, true)?;
//! ctx.bind_attributes(&program, &buffers, &layout)?;
//!
//! // once per frame
//! ctx.begin_frame(Some(ClearColor::BLACK), true)?;
//! ctx.draw_frame(&program, &buffers, &layout, &[], None)?;
//! # Ok(())
//! # }
//! ```

mod color;
mod config;
/// Error taxonomy.
pub mod error;
/// GL wrapper types and the rendering context.
pub mod gl;
/// Browser canvas and WebGL2 acquisition.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use ::gridgl_mesh::{
    Alignment, GeometryBuffer, GridMesh, GridMeshBuilder, MeshError, SurfaceSize,
};
pub use color::ClearColor;
pub use config::ContextConfig;
pub use error::Error;
pub use gl::{
    AttributeLayout, DrawCall, ImageSource, RenderingContext, ShaderProgram, ShaderStage, Texture,
    TextureParams, TextureSource, UniformValue, VertexAttribute,
};

/// GL shader language target for version injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlslVersion {
    /// WebGL2 / OpenGL ES 3.0: `#version 300 es`
    Es300,
    /// OpenGL 3.3 Core: `#version 330 core`
    Gl330,
}

impl GlslVersion {
    /// `#version` line plus default precision for vertex shaders.
    pub fn vertex_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision highp float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }

    /// `#version` line plus default precision for fragment shaders.
    pub fn fragment_preamble(&self) -> &'static str {
        match self {
            Self::Es300 => "#version 300 es\nprecision mediump float;\n",
            Self::Gl330 => "#version 330 core\n",
        }
    }

    /// Prefixes a vertex shader body with this version's preamble.
    pub fn vertex_source(&self, body: &str) -> String {
        format!("{}{body}", self.vertex_preamble())
    }

    /// Prefixes a fragment shader body with this version's preamble.
    pub fn fragment_source(&self, body: &str) -> String {
        format!("{}{body}", self.fragment_preamble())
    }
}

/// Checks whether `value` is a power of two using `value & (value - 1) == 0`.
///
/// Zero also passes this test; texture setup relies on the identity as is.
pub fn is_power_of_two(value: u32) -> bool {
    value & value.wrapping_sub(1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_power_of_two() {
        [1, 2, 4, 8, 1024, 1 << 31]
            .iter()
            .for_each(|&v| assert!(is_power_of_two(v), "expected power of two: {v}"));

        [3, 5, 6, 100, 1023, u32::MAX]
            .iter()
            .for_each(|&v| assert!(!is_power_of_two(v), "expected non power of two: {v}"));
    }

    #[test]
    fn test_zero_counts_as_power_of_two() {
        // quirk of the bit identity, kept deliberately
        assert!(is_power_of_two(0));
    }

    #[test]
    fn test_glsl_preambles() {
        assert!(
            GlslVersion::Es300
                .vertex_source("void main() {}")
                .starts_with("#version 300 es\nprecision highp float;\n")
        );
        assert_eq!(
            GlslVersion::Gl330.fragment_source("void main() {}"),
            "#version 330 core\nvoid main() {}"
        );
    }
}
