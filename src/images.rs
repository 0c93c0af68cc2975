use crate::constants::*;
use crate::core::{settled_by_size, ImageLoad};
use crate::dom::{self, Listener};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Load/error listeners for every image that has a textual fallback.
pub struct ImagesHandle {
    _listeners: Vec<Listener>,
}

fn show_fallback(document: &web::Document, img: &web::HtmlImageElement, text: &str) {
    let Ok(placeholder) = document.create_element("div") else {
        return;
    };
    placeholder.set_class_name("image-fallback");
    placeholder.set_text_content(Some(text));
    if let Err(e) = img.replace_with_with_node_1(&placeholder) {
        log::warn!("[media] fallback for {} failed: {:?}", img.src(), e);
    }
}

fn settle(
    document: &web::Document,
    img: &web::HtmlImageElement,
    state: &Cell<ImageLoad>,
    ok: bool,
) {
    let mut s = state.get();
    let changed = if ok { s.on_load() } else { s.on_error() };
    state.set(s);
    if !changed {
        return;
    }
    if let Some(parent) = img.parent_element() {
        if !s.placeholder_visible() {
            _ = parent.class_list().remove_1(IMAGE_LOADING_CLASS);
        }
    }
    if let Some(text) = s.fallback_text() {
        log::warn!("[media] image failed to load: {}", img.src());
        show_fallback(document, img, text);
    }
}

pub fn mount(document: &web::Document) -> anyhow::Result<ImagesHandle> {
    let root = document
        .document_element()
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    let mut listeners = Vec::new();
    for el in dom::query_all(&root, IMAGE_FALLBACK_SELECTOR) {
        let Ok(img) = el.dyn_into::<web::HtmlImageElement>() else {
            continue;
        };
        let state = Rc::new(Cell::new(ImageLoad::Loading));
        if let Some(parent) = img.parent_element() {
            _ = parent.class_list().add_1(IMAGE_LOADING_CLASS);
        }
        if img.complete() {
            // already settled before we got here
            match settled_by_size(img.natural_width(), img.natural_height()) {
                Some(ok) => settle(document, &img, &state, ok),
                None => {
                    let document = document.clone();
                    spawn_local(async move {
                        let ok = JsFuture::from(img.decode()).await.is_ok();
                        settle(&document, &img, &state, ok);
                    });
                }
            }
            continue;
        }
        for (event, ok) in [("load", true), ("error", false)] {
            let document = document.clone();
            let target = img.clone();
            let state = state.clone();
            listeners.push(Listener::new(img.as_ref(), event, move |_| {
                settle(&document, &target, &state, ok);
            })?);
        }
    }
    Ok(ImagesHandle {
        _listeners: listeners,
    })
}
