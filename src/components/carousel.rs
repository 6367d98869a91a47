use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{debug, info, warn};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;

pub const CAROUSEL_SELECTOR: &str = ".carousel";
pub const TRACK_SELECTOR: &str = ".carousel__track";
pub const SLIDE_SELECTOR: &str = ".testimonial";
pub const DOTS_SELECTOR: &str = ".carousel__dots";
pub const ACTIVE_CLASS: &str = "is-active";

/// Slide index plus the autoplay state machine. `len` is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    index: usize,
    len: usize,
    autoplay: bool,
    playing: bool,
}

impl Carousel {
    /// `None` when there are no slides to show.
    pub fn new(len: usize, autoplay: bool) -> Option<Self> {
        (len > 0).then_some(Self {
            index: 0,
            len,
            autoplay,
            playing: autoplay,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Jumps to slide `i`. Out-of-range indices are ignored.
    pub fn select(&mut self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        self.index = i;
        true
    }

    /// Advances one slide while autoplaying. Paused carousels stay put.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    pub fn pointer_enter(&mut self) {
        self.playing = false;
    }

    /// Returns true when autoplay should be re-armed.
    pub fn pointer_leave(&mut self) -> bool {
        self.playing = self.autoplay;
        self.playing
    }

    pub fn track_transform(&self) -> String {
        format!("translateX({}%)", -(self.index as i64) * 100)
    }

    pub fn is_active_dot(&self, dot: usize) -> bool {
        dot == self.index
    }
}

struct CarouselView {
    track: Element,
    dots: Vec<Element>,
}

impl CarouselView {
    fn render(&self, state: &Carousel) -> Result<()> {
        dom::set_style(&self.track, "transform", &state.track_transform())?;
        for (i, dot) in self.dots.iter().enumerate() {
            dom::set_class(dot, ACTIVE_CLASS, state.is_active_dot(i))?;
        }
        Ok(())
    }
}

/// Everything the dot, hover and timer callbacks share.
struct Shared {
    state: RefCell<Carousel>,
    view: RefCell<CarouselView>,
    timer: RefCell<Option<Interval>>,
    interval_ms: u32,
}

impl Shared {
    fn render(&self) {
        if let Err(e) = self.view.borrow().render(&self.state.borrow()) {
            warn!("Failed to render carousel: {}", e);
        }
    }

    fn select(&self, i: usize) {
        if self.state.borrow_mut().select(i) {
            self.render();
        }
    }

    fn stop(&self) {
        // Dropping the interval cancels it.
        self.timer.borrow_mut().take();
    }

    fn start(self: &Rc<Self>) {
        self.stop();
        if !self.state.borrow().is_playing() {
            return;
        }
        let shared = Rc::downgrade(self);
        let interval = Interval::new(self.interval_ms, move || {
            if let Some(shared) = shared.upgrade() {
                if shared.state.borrow_mut().tick() {
                    shared.render();
                }
            }
        });
        *self.timer.borrow_mut() = Some(interval);
    }
}

fn build_dots(
    document: &Document,
    container: &Element,
    shared: &Rc<Shared>,
    count: usize,
) -> Result<Vec<Element>> {
    let mut dots = Vec::with_capacity(count);
    for i in 0..count {
        let button = document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-label", &format!("Go to slide {}", i + 1))?;

        let weak = Rc::downgrade(shared);
        dom::listen(&button, "click", move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.select(i);
            }
        })?;

        container.append_child(&button)?;
        dots.push(button);
    }
    Ok(dots)
}

pub fn setup(document: &Document, interval_ms: u32) -> Result<()> {
    let Some(root) = dom::query_doc(document, CAROUSEL_SELECTOR)? else {
        debug!("No carousel, skipping");
        return Ok(());
    };
    let Some(track) = dom::query(&root, TRACK_SELECTOR)? else {
        debug!("Carousel has no track, skipping");
        return Ok(());
    };
    let slides = dom::query_all_within(&root, SLIDE_SELECTOR)?;
    let autoplay = root.get_attribute("data-autoplay").as_deref() == Some("true");
    let Some(state) = Carousel::new(slides.len(), autoplay) else {
        debug!("Carousel has no slides, skipping");
        return Ok(());
    };

    let shared = Rc::new(Shared {
        state: RefCell::new(state),
        view: RefCell::new(CarouselView { track, dots: Vec::new() }),
        timer: RefCell::new(None),
        interval_ms,
    });

    match dom::query(&root, DOTS_SELECTOR)? {
        Some(container) => {
            let dots = build_dots(document, &container, &shared, slides.len())?;
            shared.view.borrow_mut().dots = dots;
        }
        None => debug!("Carousel has no dots container"),
    }

    {
        let shared = shared.clone();
        dom::listen(&root, "mouseenter", move |_| {
            shared.state.borrow_mut().pointer_enter();
            shared.stop();
        })?;
    }
    {
        let shared = shared.clone();
        dom::listen(&root, "mouseleave", move |_| {
            if shared.state.borrow_mut().pointer_leave() {
                shared.start();
            }
        })?;
    }

    shared.render();
    shared.start();

    info!("Carousel ready with {} slides (autoplay: {})", slides.len(), autoplay);
    Ok(())
}
