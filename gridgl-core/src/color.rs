use crate::error::Error;

/// Frame clear color: RGB in `[0, 255]`, alpha already in GL units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    /// Red, `0.0..=255.0`.
    pub r: f32,
    /// Green, `0.0..=255.0`.
    pub g: f32,
    /// Blue, `0.0..=255.0`.
    pub b: f32,
    /// Passed to GL unscaled and unchecked.
    pub a: f32,
}

impl ClearColor {
    /// Opaque black.
    pub const BLACK: ClearColor = ClearColor { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// RGB in `[0, 255]`, alpha in `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xRRGGBB` value.
    pub fn from_rgb(color: u32, a: f32) -> Self {
        Self {
            r: ((color >> 16) & 0xFF) as f32,
            g: ((color >> 8) & 0xFF) as f32,
            b: (color & 0xFF) as f32,
            a,
        }
    }

    /// Returns `[r, g, b, a]` with RGB scaled to `[0, 1]`.
    ///
    /// # Errors
    /// [`Error::InvalidColorComponent`] if R, G or B lies outside `[0, 255]`.
    pub fn normalized(&self) -> Result<[f32; 4], Error> {
        for (channel, value) in [('r', self.r), ('g', self.g), ('b', self.b)] {
            if !(0.0..=255.0).contains(&value) {
                return Err(Error::invalid_color_component(channel, value));
            }
        }

        Ok([self.r / 255.0, self.g / 255.0, self.b / 255.0, self.a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_clears_to_zero() {
        let color = ClearColor::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(color.normalized().unwrap(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(ClearColor::BLACK, color);
    }

    #[test]
    fn rgb_scales_alpha_passes_through() {
        let color = ClearColor::new(255.0, 51.0, 0.0, 0.25);
        assert_eq!(color.normalized().unwrap(), [1.0, 0.2, 0.0, 0.25]);
    }

    #[test]
    fn out_of_range_component_fails() {
        let err = ClearColor::new(256.0, 0.0, 0.0, 1.0)
            .normalized()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidColorComponent { channel: 'r', value } if value == 256.0
        ));

        assert!(
            ClearColor::new(0.0, -1.0, 0.0, 1.0)
                .normalized()
                .is_err()
        );
        assert!(
            ClearColor::new(0.0, 0.0, f32::NAN, 1.0)
                .normalized()
                .is_err()
        );
    }

    #[test]
    fn alpha_is_not_range_checked() {
        let color = ClearColor::new(10.0, 20.0, 30.0, 300.0);
        assert_eq!(color.normalized().unwrap()[3], 300.0);
    }

    #[test]
    fn unpacks_packed_rgb() {
        let color = ClearColor::from_rgb(0x28_2a_36, 1.0);
        assert_eq!((color.r, color.g, color.b), (40.0, 42.0, 54.0));
    }
}
