use crate::gl::ShaderStage;

/// Error categories for the rendering wrapper.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A shader stage failed to compile; carries the driver's info log.
    #[error("Shader compilation failed ({stage}): {log}")]
    ShaderCompile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },

    /// The program failed to link; carries the driver's info log.
    #[error("Shader linking failed: {0}")]
    ShaderLink(String),

    /// GL object allocation or management errors.
    #[error("Resource error: {0}")]
    Resource(String),

    /// A geometry value does not match the representation an operation needs.
    #[error("Unsupported data kind: {0}")]
    UnsupportedDataKind(String),

    /// A texture source is neither a single pixel nor a well-formed image.
    #[error("Unsupported texture source: {0}")]
    UnsupportedTextureSource(String),

    /// A clear-color RGB component lies outside `[0, 255]`.
    #[error("Invalid color component {channel}: {value} is outside [0, 255]")]
    InvalidColorComponent {
        /// `r`, `g` or `b`.
        channel: char,
        /// The rejected value.
        value: f32,
    },

    /// Failed to acquire a drawing surface or GL context from the host.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Mesh generation errors.
    #[error(transparent)]
    Mesh(#[from] gridgl_mesh::MeshError),
}

impl Error {
    // Shader errors
    pub(crate) fn shader_creation_failed(stage: ShaderStage, detail: String) -> Self {
        Self::Resource(format!("Failed to create {stage} shader: {detail}"))
    }

    pub(crate) fn shader_program_creation_failed(detail: String) -> Self {
        Self::Resource(format!("Shader program creation failed: {detail}"))
    }

    pub(crate) fn shader_compile_failed(stage: ShaderStage, log: String) -> Self {
        Self::ShaderCompile { stage, log }
    }

    pub(crate) fn shader_link_failed(log: String) -> Self {
        Self::ShaderLink(log)
    }

    // Resource errors
    pub(crate) fn buffer_creation_failed(buffer_type: &str, detail: String) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer: {detail}"))
    }

    pub(crate) fn vertex_array_creation_failed(detail: String) -> Self {
        Self::Resource(format!("Failed to create vertex array object: {detail}"))
    }

    pub(crate) fn texture_creation_failed(detail: String) -> Self {
        Self::Resource(format!("Failed to create texture: {detail}"))
    }

    // Data errors
    pub(crate) fn no_geometry() -> Self {
        Self::UnsupportedDataKind("no geometry buffer to draw".to_string())
    }

    pub(crate) fn vertex_buffer_expected(found: &str) -> Self {
        Self::UnsupportedDataKind(format!("expected a float vertex buffer, found {found}"))
    }

    pub(crate) fn no_vertex_components(len: usize) -> Self {
        Self::UnsupportedDataKind(format!(
            "{len} floats with an empty attribute layout have no vertex size"
        ))
    }

    pub(crate) fn invalid_attribute_components(name: &str, components: u8) -> Self {
        Self::UnsupportedDataKind(format!(
            "attribute '{name}' has {components} components, expected 1 to 4"
        ))
    }

    pub(crate) fn image_size_mismatch(width: u32, height: u32, len: usize) -> Self {
        Self::UnsupportedTextureSource(format!(
            "{width}x{height} RGBA image needs {} bytes, got {len}",
            width as usize * height as usize * 4
        ))
    }

    pub(crate) fn empty_image(width: u32, height: u32) -> Self {
        Self::UnsupportedTextureSource(format!("image has no pixels: {width}x{height}"))
    }

    pub(crate) fn invalid_color_component(channel: char, value: f32) -> Self {
        Self::InvalidColorComponent { channel, value }
    }

    // Initialization errors
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn canvas_not_found() -> Self {
        Self::Initialization("Unable to retrieve canvas".to_string())
    }

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn webgl_context_failed() -> Self {
        Self::Initialization("Failed to retrieve WebGL2 rendering context".to_string())
    }

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn canvas_creation_failed() -> Self {
        Self::Initialization("Failed to create canvas element".to_string())
    }

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub(crate) fn context_attributes_failed() -> Self {
        Self::Initialization("Unable to build WebGL context attributes".to_string())
    }
}
