use std::fmt;

use glow::HasContext;

use crate::error::Error;

/// A linked vertex + fragment shader program.
///
/// The handle is only meaningful for the GL context that created it, and is
/// released through [`RenderingContext::delete_program`] so the context's
/// state cache never holds a deleted program:
///
/// ```compile_fail
/// fn release(program: gridgl_core::ShaderProgram, gl: &glow::Context) {
///     program.delete(gl);
/// }
/// ```
///
/// [`RenderingContext::delete_program`]: crate::RenderingContext::delete_program
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    pub(crate) program: glow::Program,
}

impl ShaderProgram {
    /// Compiles both stages and links them. Compile and link status are
    /// checked; failures carry the driver's info log.
    pub(crate) fn create(
        gl: &glow::Context,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, Error> {
        let vertex_shader = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
        let fragment_shader = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl.delete_shader(vertex_shader) };
                return Err(e);
            },
        };

        let program = match unsafe { gl.create_program() } {
            Ok(program) => program,
            Err(e) => {
                unsafe {
                    gl.delete_shader(vertex_shader);
                    gl.delete_shader(fragment_shader);
                }
                return Err(Error::shader_program_creation_failed(e));
            },
        };

        // attach shaders and link program
        unsafe {
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
        }
        let linked = check_link_status(gl, program);

        // shaders are no longer needed once linking has been attempted
        unsafe {
            gl.detach_shader(program, vertex_shader);
            gl.detach_shader(program, fragment_shader);
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);
        }

        if let Err(e) = linked {
            unsafe { gl.delete_program(program) };
            return Err(e);
        }

        Ok(ShaderProgram { program })
    }

    /// The raw GL program handle.
    pub fn gl_program(&self) -> glow::Program {
        self.program
    }

    /// Deletes the program, releasing the GPU resource.
    pub(crate) fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program) };
    }
}

fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, Error> {
    let shader = unsafe { gl.create_shader(stage.into()) }
        .map_err(|e| Error::shader_creation_failed(stage, e))?;

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if !unsafe { gl.get_shader_compile_status(shader) } {
        let log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        return Err(Error::shader_compile_failed(stage, log));
    }

    Ok(shader)
}

fn check_link_status(gl: &glow::Context, program: glow::Program) -> Result<(), Error> {
    let status = unsafe { gl.get_program_link_status(program) };
    if !status {
        let log = unsafe { gl.get_program_info_log(program) };
        return Err(Error::shader_link_failed(log));
    }

    Ok(())
}

/// Programmable pipeline stage of a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// `VERTEX_SHADER`
    Vertex,
    /// `FRAGMENT_SHADER`
    Fragment,
}

impl From<ShaderStage> for u32 {
    fn from(val: ShaderStage) -> Self {
        use ShaderStage::*;

        match val {
            Vertex => glow::VERTEX_SHADER,
            Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(u32::from(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(u32::from(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn compile_error_names_the_stage() {
        let err = Error::shader_compile_failed(
            ShaderStage::Fragment,
            "0:3: 'vec5' : undeclared identifier".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Shader compilation failed (fragment): 0:3: 'vec5' : undeclared identifier"
        );
    }
}
