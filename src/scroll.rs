use crate::constants::*;
use crate::core::{scroll_progress, ScrollSequencer, SectionVisualState, SequencerFrame};
use crate::dom::{self, Listener};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Showcase {
    sequencer: ScrollSequencer,
    container: web::HtmlElement,
    cards: Vec<(usize, web::HtmlElement)>,
    details: Vec<(usize, web::HtmlElement)>,
    backdrop: Option<web::HtmlElement>,
}

/// Keeps the Projects showcase in sync with scrolling until dropped.
pub struct ShowcaseHandle {
    _state: Rc<RefCell<Showcase>>,
    _listeners: Vec<Listener>,
}

fn indexed(
    container: &web::Element,
    attr: &str,
    sections: usize,
) -> Vec<(usize, web::HtmlElement)> {
    dom::query_all(container, &format!("[{}]", attr))
        .into_iter()
        .filter_map(|el| {
            let index = el.get_attribute(attr)?.trim().parse::<usize>().ok()?;
            if index >= sections {
                log::warn!("[scroll] {}={} has no breakpoints, ignored", attr, index);
                return None;
            }
            el.dyn_into::<web::HtmlElement>().ok().map(|el| (index, el))
        })
        .collect()
}

fn apply_card(el: &web::HtmlElement, v: &SectionVisualState) {
    dom::set_style(
        el,
        "transform",
        &format!("translateY({:.2}px) scale({:.4})", v.offset_y, v.scale),
    );
    dom::set_style(el, "opacity", &format!("{:.4}", v.opacity));
}

impl Showcase {
    fn sample_progress(&self) -> f32 {
        let Some(window) = web::window() else {
            return self.sequencer.progress();
        };
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let rect = self.container.get_bounding_client_rect();
        // viewport-relative coordinates, so the viewport top is 0
        scroll_progress(0.0, rect.top(), rect.height(), viewport_height)
    }

    fn refresh(&mut self, force_active: bool) {
        let progress = self.sample_progress();
        let frame = self.sequencer.update(progress);
        self.paint(&frame, force_active);
    }

    fn paint(&self, frame: &SequencerFrame, force_active: bool) {
        for (index, el) in &self.cards {
            if let Some(v) = frame.sections.get(*index) {
                apply_card(el, v);
            }
        }
        if frame.active_changed || force_active {
            for (index, el) in &self.details {
                let cl = el.class_list();
                if *index == frame.active {
                    _ = cl.add_1(ACTIVE_CLASS);
                } else {
                    _ = cl.remove_1(ACTIVE_CLASS);
                }
            }
        }
        if let Some(backdrop) = &self.backdrop {
            dom::set_style(
                backdrop,
                "transform",
                &format!("translateY({:.2}px)", frame.backdrop.offset_y),
            );
            dom::set_style(backdrop, "opacity", &format!("{:.4}", frame.backdrop.opacity));
        }
    }
}

pub fn mount(document: &web::Document) -> anyhow::Result<ShowcaseHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let container: web::HtmlElement = dom::element_by_id(document, PROJECTS_ID)?;
    let sequencer = ScrollSequencer::showcase()?;
    let sections = sequencer.table().len();
    let cards = indexed(&container, SECTION_INDEX_ATTR, sections);
    let details = indexed(&container, SECTION_DETAIL_ATTR, sections);
    for (i, range) in sequencer.table().iter().enumerate() {
        log::debug!(
            "[scroll] section {} visible over [{:.2}, {:.2}], held over [{:.2}, {:.2}]",
            i,
            range.start(),
            range.end(),
            range.peak_start(),
            range.peak_end()
        );
    }
    if cards.len() != sections {
        log::warn!("[scroll] {} cards for {} sections", cards.len(), sections);
    }
    let backdrop = dom::element_by_id::<web::HtmlElement>(document, PROJECTS_BACKDROP_ID).ok();

    let state = Rc::new(RefCell::new(Showcase {
        sequencer,
        container,
        cards,
        details,
        backdrop,
    }));
    state.borrow_mut().refresh(true);

    let mut listeners = Vec::with_capacity(2);
    for event in ["scroll", "resize"] {
        let state = state.clone();
        listeners.push(Listener::passive(window.as_ref(), event, move |_| {
            state.borrow_mut().refresh(false);
        })?);
    }
    log::info!("[scroll] showcase mounted with {} sections", sections);
    Ok(ShowcaseHandle {
        _state: state,
        _listeners: listeners,
    })
}
