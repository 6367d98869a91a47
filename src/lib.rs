//! Interactions for the portfolio page: nav toggle, reveal-on-scroll, stat
//! counters, magnetic buttons, testimonial carousel, scroll progress with
//! active-section highlighting, and the parallax background.
//!
//! Markup and styles live in the page; everything here only reads and updates
//! that DOM. Each widget is skipped when its markup is missing.

use log::warn;

pub mod config;
pub mod dom;
pub mod error;
pub mod components {
    pub mod carousel;
    pub mod footer;
    pub mod magnetic;
    pub mod nav;
    pub mod parallax;
    pub mod reveal;
    pub mod scroll;
    pub mod stats;
}

use components::{carousel, footer, magnetic, nav, parallax, reveal, scroll, stats};
pub use config::Config;
pub use error::DomError;

fn report(widget: &str, result: error::Result<()>) {
    if let Err(e) = result {
        warn!("{} disabled: {}", widget, e);
    }
}

/// Wires up every widget once the page is ready. A widget that fails to set
/// up is logged and left inactive; the rest still run.
pub fn start() {
    let (window, document) = match dom::window().and_then(|w| Ok((w, dom::document()?))) {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Page interactions unavailable: {}", e);
            return;
        }
    };

    let config = Config::from_document(&document);

    report("Nav toggle", nav::setup(&window, &document, config.nav_breakpoint_px));
    report("Reveal", reveal::setup(&window, &document, config.reveal_threshold));
    report(
        "Stat counters",
        stats::setup(&window, &document, config.stat_threshold, config.stat_duration_ms),
    );
    report("Magnetic buttons", magnetic::setup(&document, config.magnetic_strength_px));
    report("Carousel", carousel::setup(&document, config.carousel_interval_ms));
    report("Scroll tracker", scroll::setup(&window, &document, config.section_offset_px));
    report("Footer year", footer::setup(&document));
    report("Parallax", parallax::setup(&window, &document, &config));
}
