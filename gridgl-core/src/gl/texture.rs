use std::borrow::Cow;

use glow::HasContext;

use crate::{error::Error, is_power_of_two};

/// RGBA8 pixel data with known dimensions, already decoded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSource<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA rows, top row first.
    pub pixels: &'a [u8],
}

/// Pixel data for creating or updating a 2D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSource<'a> {
    /// A single RGBA pixel, producing a 1x1 solid-color texture.
    Pixel([u8; 4]),
    /// A full image.
    Image(ImageSource<'a>),
}

/// Sampler state fixed at texture creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureParams {
    /// Clamp-to-edge wrapping on both axes; otherwise the GL default (repeat).
    pub clamp_to_edge: bool,
    /// Linear minification; otherwise the GL default.
    pub linear_min_filter: bool,
    /// Rows are flipped so the image's top row lands at `v = 1`.
    pub flip_y: bool,
}

impl TextureParams {
    /// Solid-color pixels keep the GL defaults. Images are flipped and
    /// linearly minified, and clamp to edge when neither dimension is a
    /// power of two.
    pub fn for_source(source: &TextureSource) -> Self {
        match source {
            TextureSource::Pixel(_) => Self::default(),
            TextureSource::Image(image) => Self {
                clamp_to_edge: !is_power_of_two(image.width) && !is_power_of_two(image.height),
                linear_min_filter: true,
                flip_y: true,
            },
        }
    }

    fn apply(&self, gl: &glow::Context) {
        unsafe {
            if self.clamp_to_edge {
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );
            }
            if self.linear_min_filter {
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR as i32,
                );
            }
        }
    }
}

/// Validated pixel data, ready for `tex_image_2d`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TextureUpload<'a> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: Cow<'a, [u8]>,
}

impl<'a> TextureUpload<'a> {
    /// Validates `source` and applies the row flip requested by `params`.
    pub(crate) fn prepare(
        source: &'a TextureSource<'a>,
        params: &TextureParams,
    ) -> Result<Self, Error> {
        match source {
            TextureSource::Pixel(rgba) => {
                Ok(Self { width: 1, height: 1, pixels: Cow::Borrowed(rgba.as_slice()) })
            },
            TextureSource::Image(image) => {
                let ImageSource { width, height, pixels } = *image;
                if width == 0 || height == 0 {
                    return Err(Error::empty_image(width, height));
                }
                if pixels.len() != width as usize * height as usize * 4 {
                    return Err(Error::image_size_mismatch(width, height, pixels.len()));
                }

                let pixels = if params.flip_y {
                    Cow::Owned(flip_rows(pixels, width))
                } else {
                    Cow::Borrowed(pixels)
                };

                Ok(Self { width, height, pixels })
            },
        }
    }

    fn upload(&self, gl: &glow::Context) {
        unsafe {
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0, // level
                glow::RGBA as i32,
                self.width as i32,
                self.height as i32,
                0, // border
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&*self.pixels)),
            );
        }
    }
}

/// Reverses the row order of tightly packed RGBA pixels.
pub(crate) fn flip_rows(pixels: &[u8], width: u32) -> Vec<u8> {
    let row_len = width as usize * 4;
    pixels
        .chunks_exact(row_len)
        .rev()
        .flatten()
        .copied()
        .collect()
}

/// A 2D RGBA texture.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    gl_texture: glow::Texture,
    /// Texture dimensions (width, height)
    dimensions: (u32, u32),
    params: TextureParams,
}

impl Texture {
    /// Allocates a texture, binds it to `TEXTURE_2D` on the active unit,
    /// applies its sampler state and uploads the source.
    pub(crate) fn create(gl: &glow::Context, source: &TextureSource) -> Result<Self, Error> {
        let params = TextureParams::for_source(source);
        let upload = TextureUpload::prepare(source, &params)?;

        let gl_texture = unsafe { gl.create_texture() }.map_err(Error::texture_creation_failed)?;
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(gl_texture)) };

        params.apply(gl);
        upload.upload(gl);

        tracing::debug!(
            width = upload.width,
            height = upload.height,
            clamp_to_edge = params.clamp_to_edge,
            "texture created"
        );

        Ok(Self {
            gl_texture,
            dimensions: (upload.width, upload.height),
            params,
        })
    }

    /// Re-uploads pixel data. Sampler state is left as it was at creation;
    /// the row flip follows the new source.
    pub(crate) fn update(&mut self, gl: &glow::Context, source: &TextureSource) -> Result<(), Error> {
        let upload = TextureUpload::prepare(source, &TextureParams::for_source(source))?;

        self.bind(gl);
        upload.upload(gl);
        self.dimensions = (upload.width, upload.height);

        tracing::debug!(width = upload.width, height = upload.height, "texture updated");
        Ok(())
    }

    /// Binds the texture to `TEXTURE_2D` on the active texture unit.
    pub(crate) fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_texture(glow::TEXTURE_2D, Some(self.gl_texture)) };
    }

    /// Returns the texture dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// Sampler state chosen at creation.
    pub fn params(&self) -> TextureParams {
        self.params
    }

    /// The raw GL texture handle.
    pub fn gl_texture(&self) -> glow::Texture {
        self.gl_texture
    }

    /// Deletes the texture, releasing the GPU resource.
    pub(crate) fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.gl_texture) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32, pixels: &[u8]) -> TextureSource<'_> {
        TextureSource::Image(ImageSource { width, height, pixels })
    }

    #[test]
    fn single_pixel_is_one_by_one() {
        let source = TextureSource::Pixel([255, 0, 0, 255]);
        let upload = TextureUpload::prepare(&source, &TextureParams::for_source(&source)).unwrap();

        assert_eq!((upload.width, upload.height), (1, 1));
        assert_eq!(&*upload.pixels, &[255, 0, 0, 255]);
        assert_eq!(TextureParams::for_source(&source), TextureParams::default());
    }

    #[test]
    fn npot_image_clamps_to_edge() {
        let pixels = vec![0; 3 * 5 * 4];
        let params = TextureParams::for_source(&image(3, 5, &pixels));

        assert!(params.clamp_to_edge);
        assert!(params.linear_min_filter);
        assert!(params.flip_y);
    }

    #[test]
    fn pot_image_keeps_default_wrap() {
        let pixels = vec![0; 4 * 8 * 4];
        let params = TextureParams::for_source(&image(4, 8, &pixels));

        assert!(!params.clamp_to_edge);
        assert!(params.linear_min_filter);
    }

    #[test]
    fn clamp_requires_both_dimensions_npot() {
        let pixels = vec![0; 4 * 3 * 4];
        assert!(!TextureParams::for_source(&image(4, 3, &pixels)).clamp_to_edge);
        assert!(!TextureParams::for_source(&image(3, 4, &pixels)).clamp_to_edge);
    }

    #[test]
    fn image_rows_are_flipped() {
        #[rustfmt::skip]
        let pixels = [
            1, 1, 1, 1,  2, 2, 2, 2, // top row
            3, 3, 3, 3,  4, 4, 4, 4, // bottom row
        ];
        let source = image(2, 2, &pixels);
        let upload = TextureUpload::prepare(&source, &TextureParams::for_source(&source)).unwrap();

        #[rustfmt::skip]
        assert_eq!(&*upload.pixels, &[
            3, 3, 3, 3,  4, 4, 4, 4,
            1, 1, 1, 1,  2, 2, 2, 2,
        ]);
    }

    #[test]
    fn malformed_images_are_rejected() {
        let short = vec![0; 10];
        assert!(matches!(
            TextureUpload::prepare(&image(2, 2, &short), &TextureParams::default()),
            Err(Error::UnsupportedTextureSource(_))
        ));

        assert!(matches!(
            TextureUpload::prepare(&image(0, 2, &[]), &TextureParams::default()),
            Err(Error::UnsupportedTextureSource(_))
        ));
    }

    #[test]
    fn rows_stay_put_without_flip_y() {
        let pixels = [1, 1, 1, 1, 2, 2, 2, 2];
        let source = image(1, 2, &pixels);
        let params = TextureParams { flip_y: false, ..TextureParams::for_source(&source) };

        let upload = TextureUpload::prepare(&source, &params).unwrap();
        assert_eq!(&*upload.pixels, &pixels);
    }
}
