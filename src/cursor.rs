use crate::constants::*;
use crate::core::{
    CapabilitySet, CursorFollower, CursorSprite, CursorTracker, NodeChange, NodeId, NodeWatch,
};
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use crate::watch::DomNodeWatch;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// enter/leave pair for one tracked element
struct HoverListeners {
    _enter: Listener,
    _leave: Listener,
}

fn hover_listeners(
    node: &web::Element,
    id: NodeId,
    tracker: &Rc<RefCell<CursorTracker>>,
) -> anyhow::Result<HoverListeners> {
    let on_enter = tracker.clone();
    let on_leave = tracker.clone();
    Ok(HoverListeners {
        _enter: Listener::new(node.as_ref(), "mouseenter", move |_| {
            on_enter.borrow_mut().pointer_entered(id);
        })?,
        _leave: Listener::new(node.as_ref(), "mouseleave", move |_| {
            on_leave.borrow_mut().pointer_left(id);
        })?,
    })
}

fn paint(el: &web::HtmlElement, sprite: &CursorSprite) {
    dom::set_style(
        el,
        "transform",
        &format!(
            "translate3d({:.2}px, {:.2}px, 0) scale({:.3})",
            sprite.x, sprite.y, sprite.scale
        ),
    );
    dom::set_style(el, "opacity", &format!("{:.3}", sprite.opacity));
}

/// Magnetic cursor: a dot and a lagging ring that grow over hover targets.
///
/// Owns every listener it installs; dropping it stops the animation loop,
/// disconnects the mutation observer and removes all hover listeners.
pub struct CursorEffect {
    _frame: FrameLoop,
    _pointer: Listener,
    _watch: DomNodeWatch,
    _hover: Rc<RefCell<FnvHashMap<NodeId, HoverListeners>>>,
}

impl CursorEffect {
    pub fn mount(document: &web::Document) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let dot: web::HtmlElement = dom::element_by_id(document, CURSOR_DOT_ID)?;
        let trail: web::HtmlElement = dom::element_by_id(document, CURSOR_TRAIL_ID)?;

        let tracker = Rc::new(RefCell::new(CursorTracker::new()));
        let hover: Rc<RefCell<FnvHashMap<NodeId, HoverListeners>>> =
            Rc::new(RefCell::new(FnvHashMap::default()));

        let mut watch = DomNodeWatch::new(document)?;
        {
            let tracker = tracker.clone();
            let hover = hover.clone();
            watch.watch(
                CapabilitySet::ALL,
                Box::new(move |change| {
                    tracker.borrow_mut().apply(&change);
                    match change {
                        NodeChange::Added { id, node, .. } => {
                            match hover_listeners(&node, id, &tracker) {
                                // replacing an entry drops the old listeners
                                Ok(listeners) => {
                                    hover.borrow_mut().insert(id, listeners);
                                }
                                Err(e) => log::warn!("[cursor] node {}: {:?}", id, e),
                            }
                        }
                        NodeChange::Removed { id } => {
                            hover.borrow_mut().remove(&id);
                        }
                    }
                }),
            )?;
        }

        let pointer = {
            let tracker = tracker.clone();
            Listener::passive(window.as_ref(), "mousemove", move |ev| {
                if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                    tracker
                        .borrow_mut()
                        .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
                }
            })?
        };

        log::info!("[cursor] tracking {} hover targets", tracker.borrow().tracked());
        let mut follower = CursorFollower::new();
        let frame = FrameLoop::start(move |dt_sec| {
            let state = tracker.borrow().state();
            let visual = follower.step(&state, dt_sec);
            paint(&dot, &visual.dot);
            paint(&trail, &visual.trail);
        });

        Ok(Self {
            _frame: frame,
            _pointer: pointer,
            _watch: watch,
            _hover: hover,
        })
    }
}
