use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::Result;

pub const TOGGLE_SELECTOR: &str = ".nav__toggle";
pub const LIST_SELECTOR: &str = ".nav__list";
pub const OPEN_CLASS: &str = "is-open";

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavMenu {
    open: bool,
    breakpoint_px: f64,
}

impl NavMenu {
    pub fn new(breakpoint_px: f64) -> Self {
        Self { open: false, breakpoint_px }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns true if the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// A click inside the menu list closes it only when it landed on a link.
    pub fn on_list_click(&mut self, clicked_link: bool) -> bool {
        clicked_link && self.close()
    }

    /// Closes the menu once the viewport is wider than the breakpoint.
    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        viewport_width > self.breakpoint_px && self.close()
    }
}

fn render(menu: &NavMenu, toggle: &Element, list: &Element) -> Result<()> {
    dom::set_class(list, OPEN_CLASS, menu.is_open())?;
    toggle.set_attribute("aria-expanded", menu.aria_expanded())?;
    Ok(())
}

pub fn setup(window: &Window, document: &Document, breakpoint_px: f64) -> Result<()> {
    let (Some(toggle), Some(list)) = (
        dom::query_doc(document, TOGGLE_SELECTOR)?,
        dom::query_doc(document, LIST_SELECTOR)?,
    ) else {
        debug!("Nav toggle markup not found, skipping");
        return Ok(());
    };

    let menu = Rc::new(RefCell::new(NavMenu::new(breakpoint_px)));

    {
        let menu = menu.clone();
        let (toggle_el, list_el) = (toggle.clone(), list.clone());
        dom::listen(&toggle, "click", move |_| {
            let mut menu = menu.borrow_mut();
            menu.toggle();
            if let Err(e) = render(&menu, &toggle_el, &list_el) {
                log::warn!("Failed to toggle nav menu: {}", e);
            }
        })?;
    }

    // Any link in the menu closes it, which covers in-page anchor navigation.
    {
        let menu = menu.clone();
        let (toggle_el, list_el) = (toggle.clone(), list.clone());
        dom::listen(&list, "click", move |event| {
            let clicked_link = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("a").ok().flatten())
                .is_some();
            let mut menu = menu.borrow_mut();
            if menu.on_list_click(clicked_link) {
                if let Err(e) = render(&menu, &toggle_el, &list_el) {
                    log::warn!("Failed to close nav menu: {}", e);
                }
            }
        })?;
    }

    {
        let window_clone = window.clone();
        dom::listen(window, "resize", move |_| {
            let width = window_clone
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            let mut menu = menu.borrow_mut();
            if menu.on_resize(width) {
                if let Err(e) = render(&menu, &toggle, &list) {
                    log::warn!("Failed to close nav menu on resize: {}", e);
                }
            }
        })?;
    }

    info!("Nav toggle ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_mirrors_aria() {
        let mut menu = NavMenu::new(768.0);
        assert_eq!(menu.aria_expanded(), "false");
        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert!(!menu.toggle());
        assert_eq!(menu.aria_expanded(), "false");
    }

    #[test]
    fn close_reports_whether_it_changed_anything() {
        let mut menu = NavMenu::new(768.0);
        assert!(!menu.close());
        menu.toggle();
        assert!(menu.close());
        assert!(!menu.is_open());
    }

    #[test]
    fn list_click_closes_only_on_links() {
        let mut menu = NavMenu::new(768.0);
        menu.toggle();
        assert!(!menu.on_list_click(false));
        assert!(menu.is_open());
        assert!(menu.on_list_click(true));
        assert!(!menu.is_open());
        assert_eq!(menu.aria_expanded(), "false");
        // Already closed: nothing to re-render.
        assert!(!menu.on_list_click(true));
    }

    #[test]
    fn resize_only_closes_above_breakpoint() {
        let mut menu = NavMenu::new(768.0);
        menu.toggle();
        assert!(!menu.on_resize(768.0));
        assert!(menu.is_open());
        assert!(!menu.on_resize(500.0));
        assert!(menu.on_resize(1024.0));
        assert!(!menu.is_open());
    }

    #[test]
    fn resize_while_closed_is_a_no_op() {
        let mut menu = NavMenu::new(768.0);
        assert!(!menu.on_resize(1400.0));
        assert!(!menu.is_open());
    }
}
