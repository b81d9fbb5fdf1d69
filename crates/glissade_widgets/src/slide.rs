//! Slide up / slide down
//!
//! Height transitions driven by inline style: the host's CSS transition
//! engine animates `height`, `margin` and `padding` while a timer restores
//! the element's own styles once the duration has elapsed.

use glissade_core::{Completion, Element, Scheduler};

/// Default slide duration
pub const DEFAULT_DURATION_MS: u32 = 500;

const BOX_PROPERTIES: [&str; 4] = ["padding-top", "padding-bottom", "margin-top", "margin-bottom"];

fn start_transition<E: Element>(element: &E, duration_ms: u32) {
    element.set_style("transition-property", "height, margin, padding");
    element.set_style("transition-duration", &format!("{duration_ms}ms"));
}

fn collapse<E: Element>(element: &E) {
    element.set_style("overflow", "hidden");
    element.set_style("height", "0");
    for property in BOX_PROPERTIES {
        element.set_style(property, "0");
    }
}

/// Hide `element` by collapsing its height.
///
/// Once the duration has elapsed the element is `display: none` and every
/// temporary style is gone.
pub fn slide_up<E, S>(element: &E, duration_ms: u32, scheduler: &S) -> Completion
where
    E: Element + 'static,
    S: Scheduler,
{
    element.set_style("height", &format!("{}px", element.offset_height()));
    start_transition(element, duration_ms);
    // Reading the height commits the pinned height before collapsing.
    let _ = element.offset_height();
    collapse(element);

    let completion = Completion::new(1);
    let done = completion.clone();
    let element = element.clone();
    scheduler.set_timeout(
        duration_ms,
        Box::new(move || {
            element.set_style("display", "none");
            element.remove_style("height");
            for property in BOX_PROPERTIES {
                element.remove_style(property);
            }
            element.remove_style("overflow");
            element.remove_style("transition-property");
            element.remove_style("transition-duration");
            tracing::trace!("slide up finished: {:?}", element);
            done.resolve_one();
        }),
    );
    completion
}

/// Reveal `element` by growing it to its natural height.
pub fn slide_down<E, S>(element: &E, duration_ms: u32, scheduler: &S) -> Completion
where
    E: Element + 'static,
    S: Scheduler,
{
    element.remove_style("display");
    let mut display = element.computed_display();
    if display == "none" {
        display = "block".to_string();
    }
    element.set_style("display", &display);

    let height = element.offset_height();
    collapse(element);
    let _ = element.offset_height();
    start_transition(element, duration_ms);
    element.set_style("height", &format!("{height}px"));
    for property in BOX_PROPERTIES {
        element.remove_style(property);
    }

    let completion = Completion::new(1);
    let done = completion.clone();
    let element = element.clone();
    scheduler.set_timeout(
        duration_ms,
        Box::new(move || {
            element.remove_style("height");
            element.remove_style("overflow");
            element.remove_style("transition-duration");
            element.remove_style("transition-property");
            tracing::trace!("slide down finished: {:?}", element);
            done.resolve_one();
        }),
    );
    completion
}

/// Slide down when hidden, up otherwise.
pub fn slide_toggle<E, S>(element: &E, duration_ms: u32, scheduler: &S) -> Completion
where
    E: Element + 'static,
    S: Scheduler,
{
    if element.computed_display() == "none" {
        slide_down(element, duration_ms, scheduler)
    } else {
        slide_up(element, duration_ms, scheduler)
    }
}
