use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};

use crate::dom;
use crate::error::Result;

pub const MAGNETIC_SELECTOR: &str = ".magnetic";
const RESET_TRANSFORM: &str = "translate(0, 0)";

/// Offset along one axis for a cursor `relative` px into a box `extent` px long.
pub fn axis_offset(relative: f64, extent: f64, strength: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    (relative / extent - 0.5) * strength
}

pub fn translate(x: f64, y: f64) -> String {
    format!("translate({}px, {}px)", x, y)
}

pub fn setup(document: &Document, strength: f64) -> Result<()> {
    let buttons = dom::query_all(document, MAGNETIC_SELECTOR)?;
    if buttons.is_empty() {
        debug!("No magnetic buttons, skipping");
        return Ok(());
    }

    for button in &buttons {
        let btn = button.clone();
        dom::listen(button, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = btn.get_bounding_client_rect();
            let x = axis_offset(event.client_x() as f64 - rect.left(), rect.width(), strength);
            let y = axis_offset(event.client_y() as f64 - rect.top(), rect.height(), strength);
            if let Err(e) = dom::set_style(&btn, "transform", &translate(x, y)) {
                warn!("Failed to move magnetic button: {}", e);
            }
        })?;

        let btn = button.clone();
        dom::listen(button, "mouseleave", move |_| {
            if let Err(e) = dom::set_style(&btn, "transform", RESET_TRANSFORM) {
                warn!("Failed to reset magnetic button: {}", e);
            }
        })?;
    }

    info!("Magnetic effect on {} buttons", buttons.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_box_is_neutral() {
        assert_eq!(axis_offset(50.0, 100.0, 12.0), 0.0);
    }

    #[test]
    fn edges_pull_half_the_strength() {
        assert_eq!(axis_offset(0.0, 100.0, 12.0), -6.0);
        assert_eq!(axis_offset(100.0, 100.0, 12.0), 6.0);
        assert_eq!(axis_offset(75.0, 40.0, 12.0), (75.0 / 40.0 - 0.5) * 12.0);
    }

    #[test]
    fn zero_sized_box_does_not_move() {
        assert_eq!(axis_offset(10.0, 0.0, 12.0), 0.0);
    }

    #[test]
    fn translate_formats_pixels() {
        assert_eq!(translate(-6.0, 1.5), "translate(-6px, 1.5px)");
    }
}
