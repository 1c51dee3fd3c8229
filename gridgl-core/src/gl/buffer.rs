use std::slice;

use glow::HasContext;
use gridgl_mesh::GeometryBuffer;

/// Uploads an array of elements to a GL buffer as raw bytes.
///
/// # Safety
/// Requires that T:
/// - Has a stable memory layout (use #[repr(C)] or #[repr(transparent)])
/// - Contains only copy types
/// - Has no padding issues that would cause UB
pub(super) fn buffer_upload_array<T: Copy>(
    gl: &glow::Context,
    target: u32,
    data: &[T],
    usage: u32,
) {
    unsafe {
        let data_ptr = data.as_ptr() as *const u8;
        let size = std::mem::size_of_val(data);
        let bytes = slice::from_raw_parts(data_ptr, size);
        gl.buffer_data_u8_slice(target, bytes, usage);
    }
}

/// GL buffer binding target for a geometry buffer: vertex data goes to
/// `ARRAY_BUFFER`, index data to `ELEMENT_ARRAY_BUFFER`.
pub(crate) fn buffer_target(buffer: &GeometryBuffer) -> u32 {
    match buffer {
        GeometryBuffer::Vertices(_) => glow::ARRAY_BUFFER,
        GeometryBuffer::Indices8(_) | GeometryBuffer::Indices16(_) => glow::ELEMENT_ARRAY_BUFFER,
    }
}

/// Short name of the buffer's element type, for logs and error messages.
pub(crate) fn buffer_kind(buffer: &GeometryBuffer) -> &'static str {
    match buffer {
        GeometryBuffer::Vertices(_) => "f32 vertices",
        GeometryBuffer::Indices8(_) => "u8 indices",
        GeometryBuffer::Indices16(_) => "u16 indices",
    }
}

/// Uploads the buffer's contents to whatever buffer is bound to its target.
pub(super) fn upload_geometry(gl: &glow::Context, buffer: &GeometryBuffer, usage: u32) {
    let target = buffer_target(buffer);
    match buffer {
        GeometryBuffer::Vertices(data) => buffer_upload_array(gl, target, data, usage),
        GeometryBuffer::Indices8(data) => unsafe { gl.buffer_data_u8_slice(target, data, usage) },
        GeometryBuffer::Indices16(data) => buffer_upload_array(gl, target, data, usage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_follow_buffer_kind() {
        assert_eq!(
            buffer_target(&GeometryBuffer::Vertices(vec![0.0; 4])),
            glow::ARRAY_BUFFER
        );
        assert_eq!(
            buffer_target(&GeometryBuffer::Indices16(vec![0, 1, 2])),
            glow::ELEMENT_ARRAY_BUFFER
        );
        assert_eq!(
            buffer_target(&GeometryBuffer::Indices8(vec![0, 1, 2])),
            glow::ELEMENT_ARRAY_BUFFER
        );
    }
}
