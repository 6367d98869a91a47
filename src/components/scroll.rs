use log::{debug, info, warn};
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::Result;

pub const PROGRESS_SELECTOR: &str = ".scroll-progress";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = ".nav__list a";
pub const ACTIVE_CLASS: &str = "is-active";

/// Percentage of the page scrolled, 0 when the content fits in the viewport.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Index of the last section whose top, pulled up by `offset`, is at or above
/// `scroll_top`. Falls back to the first section; `None` only without sections.
pub fn active_section(section_tops: &[f64], scroll_top: f64, offset: f64) -> Option<usize> {
    if section_tops.is_empty() {
        return None;
    }
    let passed = section_tops
        .iter()
        .rposition(|&top| scroll_top >= top - offset)
        .unwrap_or(0);
    Some(passed)
}

pub fn href_for(section_id: &str) -> String {
    format!("#{}", section_id)
}

struct Tracker {
    window: Window,
    document: Document,
    progress: Option<Element>,
    sections: Vec<Element>,
    links: Vec<Element>,
    offset: f64,
}

impl Tracker {
    fn scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn update(&self) -> Result<()> {
        let scroll_top = self.scroll_top();

        if let Some(progress) = &self.progress {
            let scroll_height = self
                .document
                .document_element()
                .map(|el| el.scroll_height() as f64)
                .unwrap_or(0.0);
            let viewport_height = self
                .window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let pct = scroll_progress(scroll_top, scroll_height, viewport_height);
            dom::set_style(progress, "width", &format!("{}%", pct))?;
        }

        // Document-relative tops; bounding rects are viewport-relative.
        let tops: Vec<f64> = self
            .sections
            .iter()
            .map(|s| s.get_bounding_client_rect().top() + scroll_top)
            .collect();
        let current_id = active_section(&tops, scroll_top, self.offset)
            .map(|i| self.sections[i].id())
            .unwrap_or_default();

        for link in &self.links {
            dom::set_class(link, ACTIVE_CLASS, false)?;
        }
        let wanted = href_for(&current_id);
        if let Some(link) = self
            .links
            .iter()
            .find(|a| a.get_attribute("href").as_deref() == Some(wanted.as_str()))
        {
            dom::set_class(link, ACTIVE_CLASS, true)?;
        }
        Ok(())
    }
}

pub fn setup(window: &Window, document: &Document, section_offset: f64) -> Result<()> {
    let tracker = Tracker {
        window: window.clone(),
        document: document.clone(),
        progress: dom::query_doc(document, PROGRESS_SELECTOR)?,
        sections: dom::query_all(document, SECTION_SELECTOR)?,
        links: dom::query_all(document, NAV_LINK_SELECTOR)?,
        offset: section_offset,
    };

    if tracker.progress.is_none() && tracker.sections.is_empty() {
        debug!("No progress bar or sections, skipping scroll tracker");
        return Ok(());
    }

    tracker.update()?;
    info!(
        "Scroll tracker ready ({} sections, progress bar: {})",
        tracker.sections.len(),
        tracker.progress.is_some()
    );

    dom::listen_passive(window, "scroll", move |_| {
        if let Err(e) = tracker.update() {
            warn!("Scroll tracker update failed: {}", e);
        }
    })
}
