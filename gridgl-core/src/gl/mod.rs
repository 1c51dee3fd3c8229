mod attribute;
mod buffer;
mod context;
mod draw;
mod program;
mod renderer;
mod texture;
mod uniform;

pub use attribute::{AttributeLayout, VertexAttribute};
pub use draw::DrawCall;
pub use program::{ShaderProgram, ShaderStage};
pub use renderer::RenderingContext;
pub use texture::{ImageSource, Texture, TextureParams, TextureSource};
pub use uniform::UniformValue;
