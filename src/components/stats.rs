use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::Result;

pub const STAT_SELECTOR: &str = ".stat__num";
pub const TARGET_ATTRIBUTE: &str = "data-target";

/// Reads a counter target. Anything that isn't a finite, non-negative number counts as 0.
pub fn parse_target(raw: Option<&str>) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    if let Ok(value) = raw.parse::<u64>() {
        return value;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.floor() as u64,
        _ => 0,
    }
}

pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

pub fn ease_out_quad(p: f64) -> f64 {
    p * (2.0 - p)
}

/// Value shown `elapsed_ms` into the count-up.
pub fn displayed_value(target: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    let p = progress(elapsed_ms, duration_ms);
    if p >= 1.0 {
        return target;
    }
    let value = (target as f64 * ease_out_quad(p)).floor() as u64;
    value.min(target)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Counts `element` up to its target, one step per animation frame.
pub fn animate(window: &Window, element: &Element, duration_ms: f64) -> Result<()> {
    let target = parse_target(element.get_attribute(TARGET_ATTRIBUTE).as_deref());
    let start = now(window);

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let frame_clone = frame.clone();
    let window_clone = window.clone();
    let element = element.clone();

    *frame_clone.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let elapsed = timestamp - start;
        let text = displayed_value(target, elapsed, duration_ms).to_string();
        element.set_text_content(Some(text.as_str()));

        if progress(elapsed, duration_ms) < 1.0 {
            if let Some(callback) = frame.borrow().as_ref() {
                let next = window_clone.request_animation_frame(callback.as_ref().unchecked_ref());
                if let Err(e) = next {
                    warn!("Stat animation stopped early: {:?}", e);
                }
            }
        } else {
            // Done; release the closure so it can be dropped after this frame.
            frame.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = frame_clone.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

pub fn setup(
    window: &Window,
    document: &Document,
    threshold: f64,
    duration_ms: f64,
) -> Result<()> {
    let elements = dom::query_all(document, STAT_SELECTOR)?;
    if elements.is_empty() {
        debug!("No stat counters, skipping");
        return Ok(());
    }

    let window_clone = window.clone();
    let observed = dom::observe_once(window, &elements, threshold, move |el| {
        if let Err(e) = animate(&window_clone, el, duration_ms) {
            warn!("Failed to start stat counter: {}", e);
        }
    })
    .unwrap_or_else(|e| {
        warn!("Stat observer unavailable: {}", e);
        false
    });

    if !observed {
        for el in &elements {
            animate(window, el, duration_ms)?;
        }
    }

    info!("Stat counters ready for {} elements", elements.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_falls_back_to_zero() {
        assert_eq!(parse_target(Some("250")), 250);
        assert_eq!(parse_target(Some(" 42 ")), 42);
        assert_eq!(parse_target(Some("12.9")), 12);
        assert_eq!(parse_target(None), 0);
        assert_eq!(parse_target(Some("")), 0);
        assert_eq!(parse_target(Some("lots")), 0);
        assert_eq!(parse_target(Some("-5")), 0);
        assert_eq!(parse_target(Some("NaN")), 0);
        assert_eq!(parse_target(Some("inf")), 0);
    }

    #[test]
    fn easing_hits_known_points() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(1.0), 1.0);
    }

    #[test]
    fn value_starts_at_zero_and_ends_exactly_on_target() {
        for target in [0u64, 1, 7, 99, 1200, 987_654] {
            assert_eq!(displayed_value(target, 0.0, 1200.0), 0);
            assert_eq!(displayed_value(target, 1200.0, 1200.0), target);
            assert_eq!(displayed_value(target, 5000.0, 1200.0), target);
        }
    }

    #[test]
    fn value_is_monotonic_over_the_animation() {
        for target in [3u64, 100, 4321] {
            let mut last = 0;
            for ms in (0..=1300).step_by(16) {
                let value = displayed_value(target, ms as f64, 1200.0);
                assert!(value >= last, "dropped from {} to {} at {}ms", last, value, ms);
                assert!(value <= target);
                last = value;
            }
            assert_eq!(last, target);
        }
    }

    #[test]
    fn halfway_shows_three_quarters() {
        assert_eq!(displayed_value(100, 600.0, 1200.0), 75);
    }

    #[test]
    fn early_frame_timestamps_clamp_to_zero() {
        assert_eq!(displayed_value(500, -8.0, 1200.0), 0);
    }
}
