use crate::constants::*;
use crate::core::{classify, CapabilitySet, NodeChange, NodeId, NodeRegistry, NodeWatch};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Sink = Rc<RefCell<Box<dyn FnMut(NodeChange<web::Element>)>>>;
type Registry = Rc<RefCell<NodeRegistry<web::Element>>>;

/// [`NodeWatch`] over a DOM subtree, backed by a `MutationObserver`.
///
/// Tracked elements are stamped with a numeric id attribute so that a node
/// moved around the tree keeps its id. Copies of stamped markup are restamped.
pub struct DomNodeWatch {
    root: web::Element,
    registry: Registry,
    observer: Option<web::MutationObserver>,
    _callback: Option<Closure<dyn FnMut(js_sys::Array, web::MutationObserver)>>,
}

impl DomNodeWatch {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let root: web::Element = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("document has no body"))?
            .into();
        Ok(Self {
            root,
            registry: Rc::new(RefCell::new(NodeRegistry::new())),
            observer: None,
            _callback: None,
        })
    }
}

fn stamp(el: &web::Element) -> Option<NodeId> {
    el.get_attribute(NODE_ID_ATTR)
        .and_then(|v| v.parse::<NodeId>().ok())
}

fn node_id(el: &web::Element, registry: &Registry) -> NodeId {
    let (id, restamp) = registry.borrow_mut().claim(stamp(el), el);
    if restamp {
        _ = el.set_attribute(NODE_ID_ATTR, &id.to_string());
    }
    id
}

fn report(el: &web::Element, wanted: CapabilitySet, registry: &Registry, sink: &Sink) {
    let caps = classify(
        el.matches(INTERACTIVE_SELECTOR).unwrap_or(false),
        el.matches(TEXT_SELECTOR).unwrap_or(false),
        el.text_content().as_deref(),
    )
    .intersect(wanted);
    if caps.is_empty() {
        return;
    }
    let id = node_id(el, registry);
    (&mut *sink.borrow_mut())(NodeChange::Added {
        id,
        node: el.clone(),
        caps,
    });
}

fn tracked_selector() -> String {
    format!("{}, {}", INTERACTIVE_SELECTOR, TEXT_SELECTOR)
}

fn report_subtree(el: &web::Element, wanted: CapabilitySet, registry: &Registry, sink: &Sink) {
    report(el, wanted, registry, sink);
    for child in dom::query_all(el, &tracked_selector()) {
        report(&child, wanted, registry, sink);
    }
}

fn forget_subtree(el: &web::Element, registry: &Registry, sink: &Sink) {
    let stamped = std::iter::once(el.clone())
        .chain(dom::query_all(el, &format!("[{}]", NODE_ID_ATTR)));
    for node in stamped {
        let released = registry.borrow_mut().release(stamp(&node), &node);
        if let Some(id) = released {
            (&mut *sink.borrow_mut())(NodeChange::Removed { id });
        }
    }
}

fn elements(list: &web::NodeList) -> impl Iterator<Item = web::Element> + '_ {
    (0..list.length())
        .filter_map(move |i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
}

impl NodeWatch for DomNodeWatch {
    type Node = web::Element;

    fn watch(
        &mut self,
        wanted: CapabilitySet,
        sink: Box<dyn FnMut(NodeChange<web::Element>)>,
    ) -> anyhow::Result<()> {
        if let Some(previous) = self.observer.take() {
            previous.disconnect();
        }
        let sink: Sink = Rc::new(RefCell::new(sink));
        for el in dom::query_all(&self.root, &tracked_selector()) {
            report(&el, wanted, &self.registry, &sink);
        }

        let registry = self.registry.clone();
        let callback = Closure::wrap(Box::new(
            move |records: js_sys::Array, _observer: web::MutationObserver| {
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<web::MutationRecord>() else {
                        continue;
                    };
                    for el in elements(&record.removed_nodes()) {
                        forget_subtree(&el, &registry, &sink);
                    }
                    for el in elements(&record.added_nodes()) {
                        report_subtree(&el, wanted, &registry, &sink);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::MutationObserver)>);

        let observer = web::MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("MutationObserver: {:?}", e))?;
        let init = web::MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer
            .observe_with_options(&self.root, &init)
            .map_err(|e| anyhow::anyhow!("observe: {:?}", e))?;
        self.observer = Some(observer);
        self._callback = Some(callback);
        Ok(())
    }
}

impl Drop for DomNodeWatch {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
