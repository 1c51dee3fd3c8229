use color_eyre::eyre::{Context, Result};
use gridgl_core::{
    Alignment, AttributeLayout, ClearColor, GeometryBuffer, GlslVersion, GridMeshBuilder,
    ImageSource, RenderingContext, ShaderProgram, SurfaceSize, Texture, TextureSource,
    UniformValue,
};

use crate::cli::Cli;

const VERTEX_BODY: &str = include_str!("shaders/grid.vert");
const FRAGMENT_BODY: &str = include_str!("shaders/grid.frag");

const CHECKER_SIZE: u32 = 64;
const CHECKER_CELL: u32 = 8;
const CHECKER_LIGHT: [u8; 4] = [0xf8, 0xf8, 0xf2, 0xff];
const CHECKER_DARK: [u8; 4] = [0x62, 0x72, 0xa4, 0xff];

/// Mesh placement and shape resolved from the command line.
#[derive(Debug, Clone, Copy)]
pub struct MeshSettings {
    width: Option<f32>,
    height: Option<f32>,
    segments: (u32, u32),
    texture_coords: bool,
    alignment: Alignment,
}

impl MeshSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            width: cli.mesh_width,
            height: cli.mesh_height,
            segments: (cli.segments_x, cli.segments_y),
            texture_coords: !cli.no_uv,
            alignment: cli.alignment(),
        }
    }

    fn buffers(&self, surface: SurfaceSize) -> Result<[GeometryBuffer; 2]> {
        let (width, height) = self.size_for(surface);
        let mesh = GridMeshBuilder::new(width, height)
            .segments(self.segments.0, self.segments.1)
            .texture_coords(self.texture_coords)
            .alignment(self.alignment)
            .build(surface)
            .wrap_err("failed to build grid mesh")?;

        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.indices().len(),
            width,
            height,
            "grid mesh generated"
        );
        Ok(mesh.into_buffers())
    }

    /// Unset mesh dimensions follow the surface.
    fn size_for(&self, surface: SurfaceSize) -> (f32, f32) {
        (
            self.width.unwrap_or(surface.width as f32),
            self.height.unwrap_or(surface.height as f32),
        )
    }

    fn layout(&self) -> AttributeLayout {
        let layout = AttributeLayout::new().with("a_position", 2);
        if self.texture_coords { layout.with("a_uv", 2) } else { layout }
    }
}

/// GPU resources for one textured grid, plus what is needed to redraw it.
pub struct Scene {
    program: ShaderProgram,
    settings: MeshSettings,
    layout: AttributeLayout,
    buffers: [GeometryBuffer; 2],
    gl_buffers: Vec<glow::Buffer>,
    texture: Texture,
    checker_phase: u32,
    clear_color: ClearColor,
}

impl Scene {
    pub fn new(ctx: &mut RenderingContext, cli: &Cli) -> Result<Self> {
        let glsl = GlslVersion::from(cli.glsl);
        let program = ctx
            .create_shader_program(
                &glsl.vertex_source(VERTEX_BODY),
                &glsl.fragment_source(FRAGMENT_BODY),
            )
            .wrap_err("failed to create grid shader program")?;

        let settings = MeshSettings::from_cli(cli);
        let layout = settings.layout();
        let buffers = settings.buffers(ctx.surface_size())?;
        let gl_buffers = ctx.upload_geometry(&buffers, true)?;
        ctx.bind_attributes(&program, &buffers, &layout)?;

        let texture = if settings.texture_coords {
            let pixels = checkerboard(CHECKER_SIZE, CHECKER_CELL, 0);
            ctx.create_texture(&image_source(&pixels))?
        } else {
            ctx.create_texture(&TextureSource::Pixel(CHECKER_DARK))?
        };
        ctx.bind_texture_unit(&program, "u_texture", 0, &texture);

        Ok(Self {
            program,
            settings,
            layout,
            buffers,
            gl_buffers,
            texture,
            checker_phase: 0,
            clear_color: cli.clear_color(),
        })
    }

    /// Regenerates the mesh for a new surface size and re-uploads it into
    /// the buffers already bound to the context.
    pub fn resize(&mut self, ctx: &mut RenderingContext, surface: SurfaceSize) -> Result<()> {
        ctx.resize(surface);
        self.buffers = self.settings.buffers(surface)?;
        ctx.upload_geometry(&self.buffers, false)?;
        Ok(())
    }

    pub fn draw(&mut self, ctx: &mut RenderingContext, seconds: f32) -> Result<()> {
        let phase = seconds as u32 % 2;
        if phase != self.checker_phase && self.settings.texture_coords {
            let pixels = checkerboard(CHECKER_SIZE, CHECKER_CELL, phase);
            ctx.update_texture(&mut self.texture, &image_source(&pixels))?;
            self.checker_phase = phase;
        }

        ctx.begin_frame(Some(self.clear_color), true)?;
        ctx.draw_frame(
            &self.program,
            &self.buffers,
            &self.layout,
            &[
                ("u_time", UniformValue::Float(seconds)),
                ("u_transform", UniformValue::IDENTITY),
            ],
            Some(&self.texture),
        )?;
        Ok(())
    }

    pub fn delete(self, ctx: &mut RenderingContext) {
        ctx.delete_buffers(self.gl_buffers);
        ctx.delete_texture(self.texture);
        ctx.delete_program(self.program);
    }
}

fn image_source(pixels: &[u8]) -> TextureSource<'_> {
    TextureSource::Image(ImageSource {
        width: CHECKER_SIZE,
        height: CHECKER_SIZE,
        pixels,
    })
}

/// RGBA checkerboard of `size x size` pixels; `phase` swaps the two colors.
fn checkerboard(size: u32, cell: u32, phase: u32) -> Vec<u8> {
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x / cell + y / cell + phase) % 2 == 0))
        .flat_map(|light| if light { CHECKER_LIGHT } else { CHECKER_DARK })
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_checkerboard_layout() {
        let pixels = checkerboard(4, 2, 0);
        assert_eq!(pixels.len(), 4 * 4 * 4);
        assert_eq!(pixels[0..4], CHECKER_LIGHT);
        // x = 2 is the next cell along the first row
        assert_eq!(pixels[8..12], CHECKER_DARK);

        let swapped = checkerboard(4, 2, 1);
        assert_eq!(swapped[0..4], CHECKER_DARK);
    }

    #[test]
    fn test_mesh_follows_surface_unless_sized() {
        let cli = Cli::parse_from(["native-grid", "--mesh-width", "200"]);
        let settings = MeshSettings::from_cli(&cli);

        let (width, height) = settings.size_for(SurfaceSize::new(1280, 720));
        assert_eq!(width, 200.0);
        assert_eq!(height, 720.0);
    }

    #[test]
    fn test_layout_tracks_texture_coords() {
        let cli = Cli::parse_from(["native-grid"]);
        assert_eq!(MeshSettings::from_cli(&cli).layout().components_per_vertex(), 4);

        let cli = Cli::parse_from(["native-grid", "--no-uv"]);
        assert_eq!(MeshSettings::from_cli(&cli).layout().components_per_vertex(), 2);
    }

    #[test]
    fn test_buffers_for_default_grid() {
        let cli = Cli::parse_from(["native-grid", "--segments-x", "4", "--segments-y", "2"]);
        let buffers = MeshSettings::from_cli(&cli)
            .buffers(SurfaceSize::new(960, 600))
            .unwrap();

        assert_eq!(buffers[0].len(), 5 * 3 * 4);
        assert_eq!(buffers[1].len(), 4 * 2 * 6);
    }
}
