use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use crate::config::Config;
use crate::dom;
use crate::error::Result;

pub const BACKGROUND_SELECTOR: &str = ".bg__gradient";
pub const VAR_X: &str = "--bg-tx";
pub const VAR_Y: &str = "--bg-ty";
pub const VAR_SCROLL: &str = "--bg-scroll";

/// Pointer offset on one axis, up to `±strength / 2` around the viewport center.
pub fn pointer_offset(client: f64, viewport: f64, strength: f64) -> f64 {
    if viewport <= 0.0 {
        return 0.0;
    }
    (client / viewport - 0.5) * strength
}

pub fn scroll_drift(scroll_top: f64, factor: f64) -> f64 {
    scroll_top * factor
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

fn viewport(window: &Window) -> (f64, f64) {
    let read = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

pub fn setup(window: &Window, document: &Document, config: &Config) -> Result<()> {
    if dom::query_doc(document, BACKGROUND_SELECTOR)?.is_none() {
        debug!("No parallax background, skipping");
        return Ok(());
    }
    let root = dom::root_element(document)?;
    let style = root.style();

    {
        let window_clone = window.clone();
        let style = style.clone();
        let strength = config.parallax_strength_px;
        dom::listen_passive(window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (width, height) = viewport(&window_clone);
            let x = pointer_offset(event.client_x() as f64, width, strength);
            let y = pointer_offset(event.client_y() as f64, height, strength);
            if let Err(e) = style
                .set_property(VAR_X, &px(x))
                .and_then(|_| style.set_property(VAR_Y, &px(y)))
            {
                warn!("Failed to update parallax offset: {:?}", e);
            }
        })?;
    }

    let factor = config.parallax_scroll_factor;
    let update_scroll = {
        let window = window.clone();
        move || {
            let drift = scroll_drift(window.scroll_y().unwrap_or(0.0), factor);
            style.set_property(VAR_SCROLL, &px(drift))
        }
    };
    update_scroll()?;
    dom::listen_passive(window, "scroll", move |_| {
        if let Err(e) = update_scroll() {
            warn!("Failed to update parallax drift: {:?}", e);
        }
    })?;

    info!("Parallax background ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_offset_spans_plus_minus_half_strength() {
        assert_eq!(pointer_offset(0.0, 1000.0, 10.0), -5.0);
        assert_eq!(pointer_offset(500.0, 1000.0, 10.0), 0.0);
        assert_eq!(pointer_offset(1000.0, 1000.0, 10.0), 5.0);
    }

    #[test]
    fn pointer_offset_without_viewport_is_zero() {
        assert_eq!(pointer_offset(120.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn scroll_drifts_upward() {
        assert_eq!(scroll_drift(0.0, -0.02), 0.0);
        assert!((scroll_drift(500.0, -0.02) + 10.0).abs() < 1e-9);
        assert!(scroll_drift(1234.0, -0.02) < 0.0);
    }

    #[test]
    fn px_formats_values() {
        assert_eq!(px(-2.5), "-2.5px");
        assert_eq!(px(0.0), "0px");
    }
}
