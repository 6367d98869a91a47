//! Thin helpers over `web_sys` shared by the widgets.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::error::{DomError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(DomError::NoDocument)
}

pub fn root_element(document: &Document) -> Result<HtmlElement> {
    document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(DomError::NoRootElement)
}

pub fn query(root: &Element, selector: &str) -> Result<Option<Element>> {
    root.query_selector(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))
}

pub fn query_doc(document: &Document, selector: &str) -> Result<Option<Element>> {
    document
        .query_selector(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let nodes = root
        .query_selector_all(selector)
        .map_err(|_| DomError::Selector(selector.to_string()))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Sets an inline style property. Elements that are not `HtmlElement`s are skipped.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<()> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

/// Attaches `callback` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, callback: F) -> Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], registered as a passive listener (scroll, pointer tracking).
pub fn listen_passive<F>(target: &EventTarget, event: &str, callback: F) -> Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

pub fn supports_intersection_observer(window: &Window) -> bool {
    web_sys::js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Visibility numbers read off an `IntersectionObserverEntry`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub is_intersecting: bool,
    pub ratio: f64,
    pub visible_height: f64,
    pub root_height: f64,
}

/// True once at least `threshold` of the element is in view, or, for elements
/// too tall to ever reach that ratio, once the visible part covers `threshold`
/// of the viewport. Browsers report ratios a hair under the threshold they fired for.
pub fn entry_qualifies(visibility: Visibility, threshold: f64) -> bool {
    if !visibility.is_intersecting {
        return false;
    }
    let covers_viewport = visibility.root_height > 0.0
        && visibility.visible_height + 1e-3 >= threshold * visibility.root_height;
    visibility.ratio + 1e-3 >= threshold || covers_viewport
}

/// Observer thresholds: `threshold` itself plus 5% steps, so tall elements
/// keep reporting while they scroll into view.
pub fn observer_thresholds(threshold: f64) -> Vec<f64> {
    let mut steps: Vec<f64> = (0..=20).map(|i| i as f64 / 20.0).collect();
    steps.push(threshold.clamp(0.0, 1.0));
    steps.sort_by(|a, b| a.total_cmp(b));
    steps.dedup();
    steps
}

fn visibility_of(entry: &IntersectionObserverEntry, window: &Window) -> Visibility {
    let root_height = entry
        .root_bounds()
        .map(|rect| rect.height())
        .or_else(|| window.inner_height().ok().and_then(|h| h.as_f64()))
        .unwrap_or(0.0);
    Visibility {
        is_intersecting: entry.is_intersecting(),
        ratio: entry.intersection_ratio(),
        visible_height: entry.intersection_rect().height(),
        root_height,
    }
}

/// Observes each element until it first becomes `threshold` visible, hands it to
/// `on_visible` and stops observing it. Returns `false` when the runtime has no
/// IntersectionObserver, leaving the fallback to the caller.
pub fn observe_once<F>(
    window: &Window,
    elements: &[Element],
    threshold: f64,
    mut on_visible: F,
) -> Result<bool>
where
    F: FnMut(&Element) + 'static,
{
    if !supports_intersection_observer(window) {
        return Ok(false);
    }

    let window_clone = window.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: web_sys::js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry_qualifies(visibility_of(&entry, &window_clone), threshold) {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(&target);
                }
            }
        },
    ) as Box<dyn FnMut(web_sys::js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    let thresholds: web_sys::js_sys::Array = observer_thresholds(threshold)
        .into_iter()
        .map(JsValue::from_f64)
        .collect();
    options.set_threshold(&thresholds);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in elements {
        observer.observe(element);
    }
    Ok(true)
}
