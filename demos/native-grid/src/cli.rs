use clap::{Parser, ValueEnum};
use gridgl_core::{Alignment, ClearColor, ContextConfig, GlslVersion};

#[derive(Parser, Debug)]
#[command(
    name = "native-grid",
    about = "Draws a textured grid mesh through gridgl-core in a native window"
)]
pub struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Mesh width in pixels; follows the window when omitted
    #[arg(long, value_name = "PIXELS")]
    pub mesh_width: Option<f32>,

    /// Mesh height in pixels; follows the window when omitted
    #[arg(long, value_name = "PIXELS")]
    pub mesh_height: Option<f32>,

    /// Grid cells along the x axis
    #[arg(long, default_value_t = 16)]
    pub segments_x: u32,

    /// Grid cells along the y axis
    #[arg(long, default_value_t = 10)]
    pub segments_y: u32,

    /// Align the mesh to the top edge of the surface
    #[arg(long)]
    pub top: bool,

    /// Align the mesh to the left edge of the surface
    #[arg(long)]
    pub left: bool,

    /// Generate positions only; the texture degrades to a solid color
    #[arg(long)]
    pub no_uv: bool,

    /// Clear color as hex RGB, e.g. 1e1e2e or #1e1e2e
    #[arg(long, default_value = "1e1e2e", value_parser = parse_hex_rgb)]
    pub clear: u32,

    /// Shader dialect; also selects the GL API requested from the driver
    #[arg(long, value_enum, default_value_t = Dialect::Gl330)]
    pub glsl: Dialect,

    /// Request a drawing buffer without an alpha channel
    #[arg(long)]
    pub opaque: bool,

    /// Prefer the config with the fewest samples
    #[arg(long)]
    pub no_antialias: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Dialect {
    /// OpenGL ES 3.0 (`#version 300 es`)
    Es300,
    /// OpenGL 3.3 core (`#version 330 core`)
    Gl330,
}

impl From<Dialect> for GlslVersion {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Es300 => GlslVersion::Es300,
            Dialect::Gl330 => GlslVersion::Gl330,
        }
    }
}

impl Cli {
    pub fn context_config(&self) -> ContextConfig {
        ContextConfig::default()
            .alpha(!self.opaque)
            .antialias(!self.no_antialias)
    }

    pub fn alignment(&self) -> Alignment {
        let mut alignment = Alignment::CENTER;
        alignment.set(Alignment::TOP, self.top);
        alignment.set(Alignment::LEFT, self.left);
        alignment
    }

    pub fn clear_color(&self) -> ClearColor {
        ClearColor::from_rgb(self.clear, 1.0)
    }
}

fn parse_hex_rgb(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches('#');
    if digits.len() != 6 {
        return Err(format!("expected 6 hex digits, got '{s}'"));
    }

    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex color '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#ff8000"), Ok(0xff8000));
        assert_eq!(parse_hex_rgb("1e1e2e"), Ok(0x1e1e2e));
        assert!(parse_hex_rgb("fff").is_err());
        assert!(parse_hex_rgb("gg0000").is_err());
    }

    #[test]
    fn test_flags_map_to_alignment() {
        let cli = Cli::parse_from(["native-grid", "--top"]);
        assert_eq!(cli.alignment(), Alignment::TOP);

        let cli = Cli::parse_from(["native-grid", "--top", "--left"]);
        assert_eq!(cli.alignment(), Alignment::TOP | Alignment::LEFT);

        let cli = Cli::parse_from(["native-grid"]);
        assert!(cli.alignment().is_empty());
    }

    #[test]
    fn test_context_config_from_flags() {
        let cli = Cli::parse_from(["native-grid", "--opaque"]);
        let config = cli.context_config();
        assert!(!config.alpha);
        assert!(config.antialias);
        assert_eq!(cli.glsl, Dialect::Gl330);
    }
}
