//! Browser-side collaborators: clock, downloads, clipboard.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wavy_editor::{ExportError, ExportTarget};

// ─── Clock ───────────────────────────────────────────────────────────────

/// `performance.now()` as a monotonic clock.
#[cfg(target_arch = "wasm32")]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl Default for PerformanceClock {
    fn default() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl wavy_editor::Clock for PerformanceClock {
    fn now(&self) -> std::time::Duration {
        let ms = self.performance.as_ref().map_or(0.0, |p| p.now());
        std::time::Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

/// Native builds (tests, tooling) read the system clock instead.
#[cfg(not(target_arch = "wasm32"))]
pub type PerformanceClock = wavy_editor::animation::SystemClock;

// ─── Export ──────────────────────────────────────────────────────────────

/// Delivers exports through the page: an object-URL anchor click for
/// downloads and `navigator.clipboard` for copies.
#[derive(Debug, Default)]
pub struct BrowserExport;

fn host_error(err: JsValue) -> ExportError {
    ExportError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn object_url(contents: &str, mime: &str) -> Result<String, JsValue> {
    use web_sys::{Blob, BlobPropertyBag, Url};

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

impl ExportTarget for BrowserExport {
    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), ExportError> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Err(ExportError::NoRenderTarget);
        };
        let url = object_url(contents, mime).map_err(host_error)?;
        let anchor = document
            .create_element("a")
            .map_err(host_error)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Host("created element is not an anchor".into()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ExportError> {
        let Some(window) = web_sys::window() else {
            return Err(ExportError::ClipboardUnavailable);
        };
        let navigator = window.navigator();
        // `navigator.clipboard` is absent outside secure contexts.
        let available = js_sys::Reflect::has(&navigator, &JsValue::from_str("clipboard"))
            .unwrap_or(false);
        if !available {
            return Err(ExportError::ClipboardUnavailable);
        }

        let on_rejected = Closure::once(|err: JsValue| {
            log::warn!("clipboard write rejected: {err:?}");
        });
        let _ = navigator.clipboard().write_text(text).catch(&on_rejected);
        on_rejected.forget();
        Ok(())
    }
}
