/// A single GPU-bound data buffer.
///
/// Vertex data is interleaved `f32` attributes; index data is 8- or 16-bit
/// unsigned integers. The variant decides the buffer target on upload and the
/// shape of the draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryBuffer {
    /// Interleaved per-vertex floats.
    Vertices(Vec<f32>),
    /// 8-bit triangle indices.
    Indices8(Vec<u8>),
    /// 16-bit triangle indices.
    Indices16(Vec<u16>),
}

impl GeometryBuffer {
    /// Number of elements (floats or indices) in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Self::Vertices(data) => data.len(),
            Self::Indices8(data) => data.len(),
            Self::Indices16(data) => data.len(),
        }
    }

    /// Returns true if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        match self {
            Self::Vertices(_) => size_of::<f32>(),
            Self::Indices8(_) => size_of::<u8>(),
            Self::Indices16(_) => size_of::<u16>(),
        }
    }

    /// Size of the whole buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_size()
    }

    /// Returns true for the index variants.
    pub fn is_index(&self) -> bool {
        !matches!(self, Self::Vertices(_))
    }
}

impl From<Vec<f32>> for GeometryBuffer {
    fn from(data: Vec<f32>) -> Self {
        Self::Vertices(data)
    }
}

impl From<Vec<u16>> for GeometryBuffer {
    fn from(data: Vec<u16>) -> Self {
        Self::Indices16(data)
    }
}

impl From<Vec<u8>> for GeometryBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::Indices8(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_element_type() {
        let vertices = GeometryBuffer::from(vec![0.0_f32; 12]);
        assert_eq!(vertices.len(), 12);
        assert_eq!(vertices.byte_len(), 48);
        assert!(!vertices.is_index());

        let short = GeometryBuffer::from(vec![0_u16; 6]);
        assert_eq!(short.byte_len(), 12);
        assert!(short.is_index());

        let byte = GeometryBuffer::from(vec![0_u8; 6]);
        assert_eq!(byte.byte_len(), 6);
        assert!(byte.is_index());

        assert!(GeometryBuffer::Vertices(Vec::new()).is_empty());
    }
}
