use crate::error::Error;

/// Largest component count of a single float vertex attribute.
const MAX_ATTRIBUTE_COMPONENTS: u8 = 4;

/// A named per-vertex attribute and its float component count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name as declared in the vertex shader.
    pub name: String,
    /// Float components, `1..=4` for a layout to be bindable.
    pub components: u8,
}

/// Ordered description of an interleaved vertex buffer.
///
/// Attributes are packed per vertex in list order. Each attribute's byte
/// offset is the running sum of the components before it, and the stride is
/// the sum of all components, both scaled by the buffer's element size.
///
/// ```
/// use gridgl_core::AttributeLayout;
///
/// let layout = AttributeLayout::new()
///     .with("a_position", 2)
///     .with("a_uv", 2);
///
/// assert!(layout.validate().is_ok());
/// assert_eq!(layout.stride(4), 16);
/// let offsets: Vec<_> = layout.offsets(4).map(|(_, offset)| offset).collect();
/// assert_eq!(offsets, [0, 8]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeLayout {
    attributes: Vec<VertexAttribute>,
}

impl AttributeLayout {
    /// An empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute after the existing ones.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, components: u8) -> Self {
        self.attributes
            .push(VertexAttribute { name: name.into(), components });
        self
    }

    /// The attributes in packing order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Checks that every attribute has between 1 and 4 components.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedDataKind`] naming the first attribute out
    /// of range.
    pub fn validate(&self) -> Result<(), Error> {
        match self
            .attributes
            .iter()
            .find(|a| !(1..=MAX_ATTRIBUTE_COMPONENTS).contains(&a.components))
        {
            Some(attribute) => Err(Error::invalid_attribute_components(
                &attribute.name,
                attribute.components,
            )),
            None => Ok(()),
        }
    }

    /// Total float components per vertex.
    pub fn components_per_vertex(&self) -> usize {
        self.attributes
            .iter()
            .map(|a| usize::from(a.components))
            .sum()
    }

    /// Byte distance between consecutive vertices.
    pub fn stride(&self, element_size: usize) -> i32 {
        (self.components_per_vertex() * element_size) as i32
    }

    /// Each attribute paired with its byte offset inside a vertex.
    pub fn offsets(&self, element_size: usize) -> impl Iterator<Item = (&VertexAttribute, i32)> {
        self.attributes
            .iter()
            .scan(0_usize, move |offset, attribute| {
                let current = *offset;
                *offset += usize::from(attribute.components) * element_size;
                Some((attribute, current as i32))
            })
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for AttributeLayout {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |layout, (name, components)| layout.with(name, components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(layout: &AttributeLayout) -> Vec<(&str, i32)> {
        layout
            .offsets(size_of::<f32>())
            .map(|(a, offset)| (a.name.as_str(), offset))
            .collect()
    }

    #[test]
    fn position_then_uv() {
        let layout: AttributeLayout = [("a_position", 2), ("a_uv", 2)]
            .into_iter()
            .collect();

        assert_eq!(layout.components_per_vertex(), 4);
        assert_eq!(layout.stride(4), 16);
        assert_eq!(offsets(&layout), [("a_position", 0), ("a_uv", 8)]);
    }

    #[test]
    fn position_only() {
        let layout = AttributeLayout::new().with("a_position", 2);

        assert_eq!(layout.stride(4), 8);
        assert_eq!(offsets(&layout), [("a_position", 0)]);
    }

    #[test]
    fn offsets_are_running_sums() {
        let layout = AttributeLayout::new()
            .with("a_position", 3)
            .with("a_normal", 3)
            .with("a_uv", 2);

        assert_eq!(layout.components_per_vertex(), 8);
        assert_eq!(layout.stride(4), 32);
        assert_eq!(
            offsets(&layout),
            [("a_position", 0), ("a_normal", 12), ("a_uv", 24)]
        );
    }

    #[test]
    fn uv_first_is_not_special_cased() {
        let layout = AttributeLayout::new()
            .with("a_uv", 2)
            .with("a_position", 3);

        assert_eq!(offsets(&layout), [("a_uv", 0), ("a_position", 8)]);
    }

    #[test]
    fn stride_and_offsets_agree() {
        let layout = AttributeLayout::new()
            .with("a_position", 2)
            .with("a_color", 4);

        let (last, offset) = layout.offsets(4).last().unwrap();
        assert_eq!(offset + i32::from(last.components) * 4, layout.stride(4));
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        let zero = AttributeLayout::new().with("a_position", 2).with("a_unused", 0);
        assert!(matches!(
            zero.validate(),
            Err(Error::UnsupportedDataKind(msg)) if msg.contains("a_unused")
        ));

        let wide = AttributeLayout::new().with("a_matrix", 7);
        assert!(matches!(wide.validate(), Err(Error::UnsupportedDataKind(_))));

        let empty = AttributeLayout::new();
        assert!(empty.validate().is_ok());
    }
}
