//! Canvas and WebGL2 context acquisition in the browser.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, WebGl2RenderingContext};

use crate::{config::ContextConfig, error::Error, gl::RenderingContext};
use gridgl_mesh::SurfaceSize;

pub(crate) fn document() -> Result<Document, Error> {
    web_sys::window()
        .ok_or(Error::window_not_found())
        .and_then(|w| w.document().ok_or(Error::document_not_found()))
}

/// Looks up an existing canvas with a CSS selector, e.g. `"#viewport"`.
pub fn canvas_by_selector(selector: &str) -> Result<HtmlCanvasElement, Error> {
    document()?
        .query_selector(selector)
        .map_err(|_| Error::canvas_not_found())?
        .ok_or(Error::canvas_not_found())?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::canvas_not_found())
}

/// Creates a detached canvas element with the given backing size.
pub fn create_canvas(size: SurfaceSize) -> Result<HtmlCanvasElement, Error> {
    let canvas = document()?
        .create_element("canvas")
        .map_err(|_| Error::canvas_creation_failed())?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::canvas_creation_failed())?;

    canvas.set_width(size.width);
    canvas.set_height(size.height);
    Ok(canvas)
}

fn context_attributes(config: &ContextConfig) -> Result<js_sys::Object, Error> {
    let attributes = js_sys::Object::new();
    [
        ("alpha", config.alpha),
        ("antialias", config.antialias),
        ("preserveDrawingBuffer", config.preserve_drawing_buffer),
    ]
    .into_iter()
    .try_for_each(|(key, value)| {
        js_sys::Reflect::set(&attributes, &JsValue::from_str(key), &JsValue::from_bool(value))
            .map(|_| ())
            .map_err(|_| Error::context_attributes_failed())
    })?;

    Ok(attributes)
}

/// Requests a WebGL2 context from `canvas` with the attributes in `config`.
pub fn webgl2_context(
    canvas: &HtmlCanvasElement,
    config: &ContextConfig,
) -> Result<WebGl2RenderingContext, Error> {
    let attributes = context_attributes(config)?;
    canvas
        .get_context_with_context_options("webgl2", &attributes)
        .map_err(|_| Error::webgl_context_failed())?
        .ok_or(Error::webgl_context_failed())?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| Error::webgl_context_failed())
}

impl RenderingContext {
    /// Acquires a WebGL2 context from `canvas` and wraps it. The surface
    /// size is taken from the canvas backing store.
    ///
    /// # Errors
    /// Returns [`Error::Initialization`] if the browser refuses a WebGL2
    /// context, and anything [`RenderingContext::new`] returns.
    pub fn from_canvas(canvas: &HtmlCanvasElement, config: ContextConfig) -> Result<Self, Error> {
        let webgl2 = webgl2_context(canvas, &config)?;
        let gl = glow::Context::from_webgl2_context(webgl2);
        let surface = SurfaceSize::new(canvas.width(), canvas.height());

        Self::new(gl, surface, config)
    }
}
