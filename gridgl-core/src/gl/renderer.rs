use glow::HasContext;
use gridgl_mesh::{GeometryBuffer, SurfaceSize};

use crate::{
    color::ClearColor,
    config::ContextConfig,
    error::Error,
    gl::{
        AttributeLayout, DrawCall, ShaderProgram, Texture, TextureSource, UniformValue,
        buffer::{buffer_kind, buffer_target, upload_geometry},
        context::GlState,
    },
};

/// Immediate-style wrapper around a GL context and its drawing surface.
///
/// The `RenderingContext` owns the glow context for the lifetime of the
/// application and exposes the handful of operations needed to draw
/// textured meshes: program creation, buffer upload, attribute and uniform
/// binding, 2D textures, frame setup and draw calls.
///
/// All calls must come from the thread that owns the GL context. Handles it
/// returns ([`ShaderProgram`], [`Texture`], buffers) are only valid for this
/// context.
#[derive(Debug)]
pub struct RenderingContext {
    gl: glow::Context,
    state: GlState,
    vao: glow::VertexArray,
    surface: SurfaceSize,
    config: ContextConfig,
}

impl RenderingContext {
    /// Wraps an existing GL context targeting a surface of the given size.
    ///
    /// A vertex array object is created and left bound, so attribute
    /// bindings also work on core-profile desktop GL. The viewport is set to
    /// the full surface.
    ///
    /// # Errors
    /// Returns [`Error::Resource`] if the vertex array object cannot be created.
    pub fn new(
        gl: glow::Context,
        surface: SurfaceSize,
        config: ContextConfig,
    ) -> Result<Self, Error> {
        let state = GlState::new(&gl);
        let vao =
            unsafe { gl.create_vertex_array() }.map_err(Error::vertex_array_creation_failed)?;
        unsafe { gl.bind_vertex_array(Some(vao)) };

        let mut context = Self { gl, state, vao, surface, config };
        let (width, height) = surface.as_i32();
        context
            .state
            .viewport(&context.gl, 0, 0, width, height);

        tracing::debug!(width, height, alpha = config.alpha, "rendering context created");
        Ok(context)
    }

    /// Records a new surface size. The viewport follows on the next
    /// [`begin_frame`](Self::begin_frame) that asks for it.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    /// Returns the current surface size in pixels.
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface
    }

    /// Returns the configuration the context was created with.
    pub fn config(&self) -> ContextConfig {
        self.config
    }

    /// Returns the underlying glow context.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Compiles and links a program from vertex and fragment source, then
    /// makes it current.
    ///
    /// # Errors
    /// * [`Error::ShaderCompile`] - a stage failed to compile
    /// * [`Error::ShaderLink`] - the program failed to link
    /// * [`Error::Resource`] - the driver could not allocate the objects
    pub fn create_shader_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram, Error> {
        let program = ShaderProgram::create(&self.gl, vertex_source, fragment_source)?;
        self.state.use_program(&self.gl, program.program);

        tracing::debug!(program = ?program.program, "shader program linked");
        Ok(program)
    }

    /// Deletes a program created by this context.
    pub fn delete_program(&mut self, program: ShaderProgram) {
        self.state.forget_program(program.program);
        program.delete(&self.gl);
    }

    /// Uploads each buffer to its target: vertex data to `ARRAY_BUFFER`,
    /// index data to `ELEMENT_ARRAY_BUFFER`.
    ///
    /// With `allocate_new_buffer`, a fresh GL buffer is created and bound for
    /// each entry before upload, and the new handles are returned in order.
    /// Otherwise the data goes into whatever buffer is currently bound to the
    /// target and nothing is returned.
    ///
    /// # Errors
    /// Returns [`Error::Resource`] if a buffer cannot be created; buffers
    /// allocated earlier in the same call are released.
    pub fn upload_geometry(
        &mut self,
        buffers: &[GeometryBuffer],
        allocate_new_buffer: bool,
    ) -> Result<Vec<glow::Buffer>, Error> {
        let mut allocated = Vec::new();

        for buffer in buffers {
            let target = buffer_target(buffer);
            if allocate_new_buffer {
                let handle = match unsafe { self.gl.create_buffer() } {
                    Ok(handle) => handle,
                    Err(e) => {
                        self.delete_buffers(allocated);
                        return Err(Error::buffer_creation_failed(buffer_kind(buffer), e));
                    },
                };
                unsafe { self.gl.bind_buffer(target, Some(handle)) };
                allocated.push(handle);
            }

            upload_geometry(&self.gl, buffer, glow::STATIC_DRAW);
            tracing::debug!(
                kind = buffer_kind(buffer),
                bytes = buffer.byte_len(),
                allocate_new_buffer,
                "geometry uploaded"
            );
        }

        Ok(allocated)
    }

    /// Deletes buffers returned by [`upload_geometry`](Self::upload_geometry).
    pub fn delete_buffers(&mut self, buffers: impl IntoIterator<Item = glow::Buffer>) {
        for buffer in buffers {
            unsafe { self.gl.delete_buffer(buffer) };
        }
    }

    /// Points each attribute of `layout` at the vertex buffer bound to
    /// `ARRAY_BUFFER`.
    ///
    /// The first entry of `buffers` must be the float vertex buffer; its
    /// element size scales the layout's stride and offsets. Attributes the
    /// program does not declare (or that were optimized out) are skipped.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedDataKind`] if `buffers` is empty, starts
    /// with an index buffer, or `layout` has an attribute without 1 to 4
    /// components.
    pub fn bind_attributes(
        &mut self,
        program: &ShaderProgram,
        buffers: &[GeometryBuffer],
        layout: &AttributeLayout,
    ) -> Result<(), Error> {
        let vertices = buffers.first().ok_or_else(Error::no_geometry)?;
        if vertices.is_index() {
            return Err(Error::vertex_buffer_expected(buffer_kind(vertices)));
        }

        layout.validate()?;

        let element_size = vertices.element_size();
        let stride = layout.stride(element_size);
        for (attribute, offset) in layout.offsets(element_size) {
            let location = unsafe { self.gl.get_attrib_location(program.program, &attribute.name) };
            let Some(location) = location else {
                tracing::warn!(name = %attribute.name, "attribute not active in program, skipped");
                continue;
            };

            self.state
                .vertex_attrib_array(&self.gl, location, true);
            unsafe {
                self.gl.vertex_attrib_pointer_f32(
                    location,
                    i32::from(attribute.components),
                    glow::FLOAT,
                    false,
                    stride,
                    offset,
                );
            }
        }

        Ok(())
    }

    /// Uploads named uniform values to `program`, making it current first.
    ///
    /// Names without a location in the program are skipped.
    pub fn set_uniforms(&mut self, program: &ShaderProgram, values: &[(&str, UniformValue)]) {
        self.state.use_program(&self.gl, program.program);

        for (name, value) in values {
            match unsafe { self.gl.get_uniform_location(program.program, name) } {
                Some(location) => value.upload(&self.gl, &location),
                None => tracing::warn!(
                    name,
                    kind = value.glsl_type(),
                    "uniform not active in program, skipped"
                ),
            }
        }
    }

    /// Creates a 2D texture from a single pixel or an image and leaves it
    /// bound on the active texture unit.
    ///
    /// # Errors
    /// * [`Error::UnsupportedTextureSource`] - image with no pixels, or a pixel
    ///   slice whose length is not `width * height * 4`
    /// * [`Error::Resource`] - the driver could not allocate the texture
    pub fn create_texture(&mut self, source: &TextureSource) -> Result<Texture, Error> {
        Texture::create(&self.gl, source)
    }

    /// Replaces the pixel data of an existing texture, keeping its sampler
    /// state.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedTextureSource`] for a malformed image.
    pub fn update_texture(
        &mut self,
        texture: &mut Texture,
        source: &TextureSource,
    ) -> Result<(), Error> {
        texture.update(&self.gl, source)
    }

    /// Deletes a texture created by this context.
    pub fn delete_texture(&mut self, texture: Texture) {
        texture.delete(&self.gl);
    }

    /// Binds `texture` to texture unit `unit` and points the `sampler`
    /// uniform of `program` at that unit.
    pub fn bind_texture_unit(
        &mut self,
        program: &ShaderProgram,
        sampler: &str,
        unit: u32,
        texture: &Texture,
    ) {
        self.state
            .active_texture(&self.gl, glow::TEXTURE0 + unit);
        texture.bind(&self.gl);
        self.set_uniforms(program, &[(sampler, UniformValue::Int(unit as i32))]);
    }

    /// Prepares the framebuffer for a new frame.
    ///
    /// Sets the clear color when one is given, resets the viewport to the
    /// current surface size when `resize_viewport` is set, and always clears
    /// the color buffer.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColorComponent`] if an RGB component of
    /// `clear_color` is outside `[0, 255]`; nothing is cleared in that case.
    pub fn begin_frame(
        &mut self,
        clear_color: Option<ClearColor>,
        resize_viewport: bool,
    ) -> Result<(), Error> {
        if let Some(color) = clear_color {
            let rgba = color.normalized()?;
            self.state.clear_color(&self.gl, rgba);
        }

        if resize_viewport {
            let (width, height) = self.surface.as_i32();
            self.state
                .viewport(&self.gl, 0, 0, width, height);
        }

        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) };
        Ok(())
    }

    /// Uploads `uniforms`, binds `texture` if given, and issues one triangle
    /// draw call shaped by `buffers` (see [`DrawCall::plan`]).
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedDataKind`] if `buffers` is empty, or if it
    /// draws from a vertex buffer and `layout` has no components.
    pub fn draw_frame(
        &mut self,
        program: &ShaderProgram,
        buffers: &[GeometryBuffer],
        layout: &AttributeLayout,
        uniforms: &[(&str, UniformValue)],
        texture: Option<&Texture>,
    ) -> Result<(), Error> {
        let call = DrawCall::plan(buffers, layout.components_per_vertex())?;

        self.set_uniforms(program, uniforms);
        if let Some(texture) = texture {
            texture.bind(&self.gl);
        }

        tracing::trace!(?call, "draw");
        call.issue(&self.gl);
        Ok(())
    }

    /// Unbinds the current program, disables every vertex attribute array
    /// and returns to texture unit 0.
    ///
    /// Call this after other code has issued GL calls on the same context;
    /// attribute bindings must be redone afterwards.
    pub fn reset_state(&mut self) {
        self.state.reset(&self.gl);
    }

    /// Releases the context's own GL objects and returns the glow context.
    pub fn into_inner(self) -> glow::Context {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vao);
        }
        self.gl
    }
}
