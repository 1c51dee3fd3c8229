use glow::HasContext;

/// Manages simple GL state to reduce redundant state changes
#[derive(Debug)]
pub struct GlState {
    // Viewport dimensions
    viewport: [i32; 4], // [x, y, width, height]

    // Clear color
    clear_color: [f32; 4],

    // Active texture unit
    active_texture_unit: u32,

    // Program in use
    program: Option<glow::Program>,

    // Enabled vertex attribute arrays
    enabled_vertex_attribs: Vec<bool>,
}

impl GlState {
    /// Create a new GLState object with GL defaults
    pub fn new(gl: &glow::Context) -> Self {
        // Get max vertex attributes
        let max_vertex_attribs = unsafe { gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) as usize };

        Self {
            viewport: [0, 0, 0, 0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            active_texture_unit: glow::TEXTURE0,
            program: None,
            enabled_vertex_attribs: vec![false; max_vertex_attribs],
        }
    }

    /// Set viewport dimensions
    pub fn viewport(
        &mut self,
        gl: &glow::Context,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> &mut Self {
        let new_viewport = [x, y, width, height];
        if self.viewport != new_viewport {
            unsafe { gl.viewport(x, y, width, height) };
            self.viewport = new_viewport;
        }
        self
    }

    /// Set clear color
    pub fn clear_color(&mut self, gl: &glow::Context, [r, g, b, a]: [f32; 4]) -> &mut Self {
        let new_color = [r, g, b, a];
        if self.clear_color != new_color {
            unsafe { gl.clear_color(r, g, b, a) };
            self.clear_color = new_color;
        }
        self
    }

    /// Set active texture unit, given as `TEXTURE0 + n`
    pub fn active_texture(&mut self, gl: &glow::Context, texture_unit: u32) -> &mut Self {
        if self.active_texture_unit != texture_unit {
            unsafe { gl.active_texture(texture_unit) };
            self.active_texture_unit = texture_unit;
        }
        self
    }

    /// Make a program current
    pub fn use_program(&mut self, gl: &glow::Context, program: glow::Program) -> &mut Self {
        if self.program != Some(program) {
            unsafe { gl.use_program(Some(program)) };
            self.program = Some(program);
        }
        self
    }

    /// Enable or disable a vertex attribute array
    pub fn vertex_attrib_array(
        &mut self,
        gl: &glow::Context,
        index: u32,
        enable: bool,
    ) -> &mut Self {
        let idx = index as usize;
        if idx < self.enabled_vertex_attribs.len() && self.enabled_vertex_attribs[idx] != enable {
            if enable {
                unsafe { gl.enable_vertex_attrib_array(index) };
            } else {
                unsafe { gl.disable_vertex_attrib_array(index) };
            }
            self.enabled_vertex_attribs[idx] = enable;
        }
        self
    }

    /// Forget a program that is being deleted
    pub(crate) fn forget_program(&mut self, program: glow::Program) {
        if self.program == Some(program) {
            self.program = None;
        }
    }

    /// Reset all tracked state to GL defaults
    pub fn reset(&mut self, gl: &glow::Context) {
        // Reset texture unit
        if self.active_texture_unit != glow::TEXTURE0 {
            unsafe { gl.active_texture(glow::TEXTURE0) };
            self.active_texture_unit = glow::TEXTURE0;
        }

        if self.program.take().is_some() {
            unsafe { gl.use_program(None) };
        }

        // Reset vertex attributes
        for (idx, enabled) in self.enabled_vertex_attribs.iter_mut().enumerate() {
            if *enabled {
                unsafe { gl.disable_vertex_attrib_array(idx as u32) };
                *enabled = false;
            }
        }

        // Note: viewport and clear_color are left alone; they follow the
        // surface size and the caller's frame setup
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    fn program(id: u32) -> glow::Program {
        glow::NativeProgram(NonZeroU32::new(id).unwrap())
    }

    fn state_using(current: glow::Program) -> GlState {
        GlState {
            viewport: [0, 0, 0, 0],
            clear_color: [0.0; 4],
            active_texture_unit: glow::TEXTURE0,
            program: Some(current),
            enabled_vertex_attribs: vec![false; 16],
        }
    }

    #[test]
    fn forgetting_the_current_program_clears_the_cache() {
        let mut state = state_using(program(1));
        state.forget_program(program(1));
        assert_eq!(state.program, None);
    }

    #[test]
    fn forgetting_another_program_keeps_the_cache() {
        let mut state = state_using(program(1));
        state.forget_program(program(2));
        assert_eq!(state.program, Some(program(1)));
    }
}
