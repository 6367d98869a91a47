use log::{debug, info, warn};
use web_sys::{Document, Window};

use crate::dom;
use crate::error::Result;

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const VISIBLE_CLASS: &str = "is-visible";

pub fn setup(window: &Window, document: &Document, threshold: f64) -> Result<()> {
    let elements = dom::query_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        debug!("No reveal targets, skipping");
        return Ok(());
    }

    let observed = dom::observe_once(window, &elements, threshold, |el| {
        if let Err(e) = dom::set_class(el, VISIBLE_CLASS, true) {
            warn!("Failed to reveal element: {}", e);
        }
    })
    .unwrap_or_else(|e| {
        warn!("Reveal observer unavailable: {}", e);
        false
    });

    if !observed {
        // No usable IntersectionObserver: show everything up front.
        for el in &elements {
            dom::set_class(el, VISIBLE_CLASS, true)?;
        }
    }

    info!("Reveal-on-scroll ready for {} elements", elements.len());
    Ok(())
}
