use std::num::NonZeroU32;

use color_eyre::eyre::{Context, OptionExt, Result, eyre};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use gridgl_core::{ContextConfig, GlslVersion, SurfaceSize};
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes},
};

/// A winit window with a current GL context and its window surface.
///
/// The glow context is handed out at creation; the window keeps what is
/// needed to resize and present.
pub struct GlWindow {
    pub window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
}

impl GlWindow {
    pub fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: (u32, u32),
        glsl: GlslVersion,
        config: &ContextConfig,
    ) -> Result<(Self, glow::Context)> {
        let window_attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(size.0, size.1));

        let alpha_size = if config.alpha { 8 } else { 0 };
        let config_template = ConfigTemplateBuilder::new().with_alpha_size(alpha_size);

        let antialias = config.antialias;
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attrs))
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        let more_samples = config.num_samples() > accum.num_samples();
                        if more_samples == antialias { config } else { accum }
                    })
                    .expect("display offers at least one GL config")
            })
            .map_err(|e| eyre!("failed to build display: {e}"))?;

        let window = window.ok_or_eyre("display builder returned no window")?;
        let gl_display = gl_config.display();

        let api = match glsl {
            GlslVersion::Gl330 => ContextApi::OpenGl(Some(Version::new(3, 3))),
            GlslVersion::Es300 => ContextApi::Gles(Some(Version::new(3, 0))),
        };
        let raw_handle = window
            .window_handle()
            .wrap_err("failed to get window handle")?
            .as_raw();
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(api)
            .build(Some(raw_handle));

        let not_current_context = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .wrap_err("failed to create GL context")?;

        let inner = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            non_zero(inner.width)?,
            non_zero(inner.height)?,
        );

        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .wrap_err("failed to create GL surface")?;

        let gl_context = not_current_context
            .make_current(&gl_surface)
            .wrap_err("failed to make GL context current")?;

        if let Err(e) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            tracing::warn!(error = %e, "vsync unavailable");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        Ok((Self { window, gl_context, gl_surface }, gl))
    }

    pub fn surface_size(&self) -> SurfaceSize {
        let s = self.window.inner_size();
        SurfaceSize::new(s.width, s.height)
    }

    pub fn resize_surface(&self, new_size: PhysicalSize<u32>) -> Result<()> {
        self.gl_surface.resize(
            &self.gl_context,
            non_zero(new_size.width)?,
            non_zero(new_size.height)?,
        );
        Ok(())
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .wrap_err("failed to swap buffers")
    }
}

fn non_zero(value: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(value).ok_or_eyre("surface dimension is zero")
}
