/// W3D Web - runs drawing scripts in the browser
///
/// Each `display` command copies the framebuffer onto a 2D canvas.

use wasm_bindgen::{prelude::*, Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};
use w3d_core::{Config, Interpreter, Presenter, RenderError, Screen};

/// Presenter that blits frames onto a canvas
struct CanvasPresenter {
    context: CanvasRenderingContext2d,
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, screen: &Screen) -> Result<(), RenderError> {
        let rgba = screen.to_rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(rgba.as_slice()),
            screen.width() as u32,
            screen.height() as u32,
        )
        .map_err(js_error)?;
        self.context
            .put_image_data(&image, 0.0, 0.0)
            .map_err(js_error)
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Present(format!("{:?}", value))
}

#[wasm_bindgen]
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas element with the given id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("{canvas_id} is not a canvas")))?;
        Ok(WebRenderer { canvas })
    }

    /// Run a script and return its diagnostics, one per line
    pub fn run(&mut self, script: &str) -> Result<String, JsValue> {
        let context = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let config = Config::with_size(self.canvas.width() as usize, self.canvas.height() as usize);
        let mut interpreter = Interpreter::new(config, CanvasPresenter { context });
        let report = interpreter.run_lines(script.lines());

        let diagnostics: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
        Ok(diagnostics.join("\n"))
    }
}
