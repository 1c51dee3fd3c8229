use glow::HasContext;

/// A typed value for a shader uniform.
///
/// Matrices are column-major and uploaded without transposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Uploaded as an integer 0 or 1.
    Bool(bool),
    /// Also used for sampler uniforms, where the value is a texture unit.
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2([f32; 2]),
    /// `vec3`
    Vec3([f32; 3]),
    /// `vec4`
    Vec4([f32; 4]),
    /// `mat4`, column-major.
    Mat4([f32; 16]),
}

impl UniformValue {
    /// Column-major 4x4 identity matrix.
    #[rustfmt::skip]
    pub const IDENTITY: UniformValue = UniformValue::Mat4([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// GLSL type name matching this value.
    pub fn glsl_type(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Mat4(_) => "mat4",
        }
    }

    /// Uploads the value to `location` of the program currently in use.
    pub(crate) fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        let location = Some(location);
        unsafe {
            match self {
                Self::Bool(v) => gl.uniform_1_i32(location, *v as i32),
                Self::Int(v) => gl.uniform_1_i32(location, *v),
                Self::Float(v) => gl.uniform_1_f32(location, *v),
                Self::Vec2(v) => gl.uniform_2_f32_slice(location, v),
                Self::Vec3(v) => gl.uniform_3_f32_slice(location, v),
                Self::Vec4(v) => gl.uniform_4_f32_slice(location, v),
                Self::Mat4(m) => gl.uniform_matrix_4_f32_slice(location, false, m),
            }
        }
    }
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        Self::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        Self::Vec3(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        Self::Vec4(v)
    }
}

impl From<[f32; 16]> for UniformValue {
    fn from(v: [f32; 16]) -> Self {
        Self::Mat4(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_matching_kind() {
        assert_eq!(UniformValue::from(true), UniformValue::Bool(true));
        assert_eq!(UniformValue::from(3_i32), UniformValue::Int(3));
        assert_eq!(UniformValue::from(0.5_f32), UniformValue::Float(0.5));
        assert_eq!(UniformValue::from([1.0_f32, 2.0]), UniformValue::Vec2([1.0, 2.0]));
        assert_eq!(
            UniformValue::from([1.0_f32, 2.0, 3.0]),
            UniformValue::Vec3([1.0, 2.0, 3.0])
        );
        assert_eq!(
            UniformValue::from([1.0_f32, 2.0, 3.0, 4.0]),
            UniformValue::Vec4([1.0, 2.0, 3.0, 4.0])
        );
    }

    #[test]
    fn glsl_type_names() {
        let names: Vec<_> = [
            UniformValue::Bool(false),
            UniformValue::Int(0),
            UniformValue::Float(0.0),
            UniformValue::Vec2([0.0; 2]),
            UniformValue::Vec3([0.0; 3]),
            UniformValue::Vec4([0.0; 4]),
            UniformValue::IDENTITY,
        ]
        .iter()
        .map(UniformValue::glsl_type)
        .collect();

        assert_eq!(names, ["bool", "int", "float", "vec2", "vec3", "vec4", "mat4"]);
    }

    #[test]
    fn identity_is_column_major() {
        let UniformValue::Mat4(m) = UniformValue::IDENTITY else {
            panic!("identity must be a mat4");
        };
        for col in 0..4 {
            for row in 0..4 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_eq!(m[col * 4 + row], expected);
            }
        }
    }
}
