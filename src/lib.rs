#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod backdrop;
mod constants;
mod contact;
mod core;
mod cursor;
mod dom;
mod frame;
mod images;
mod perf;
mod reveal;
mod scroll;
mod watch;

/// Everything mounted on the page. Dropping it removes every listener and observer.
struct Page {
    _showcase: Option<scroll::ShowcaseHandle>,
    _cursor: Option<cursor::CursorEffect>,
    _contact: Option<contact::ContactHandle>,
    _images: Option<images::ImagesHandle>,
    _reveal: Option<reveal::RevealHandle>,
    _perf: Option<perf::PerfHandle>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

// Failures stay local to the feature that hit them.
fn mounted<T>(what: &str, result: anyhow::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::error!("[{}] not mounted: {:?}", what, e);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    match backdrop::populate(&document) {
        Ok(hosts) => log::debug!("[backdrop] populated {} particle hosts", hosts),
        Err(e) => log::warn!("[backdrop] {:?}", e),
    }

    let page = Page {
        _showcase: mounted("scroll", scroll::mount(&document)),
        _cursor: mounted("cursor", cursor::CursorEffect::mount(&document)),
        _contact: mounted("contact", contact::mount(&document)),
        _images: mounted("media", images::mount(&document)),
        _reveal: mounted("reveal", reveal::mount(&document)),
        // vitals are only worth logging for optimised builds
        _perf: if cfg!(debug_assertions) {
            None
        } else {
            mounted("perf", perf::mount())
        },
    };
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}

/// Tear the page effects down, e.g. before a host framework replaces the markup.
#[wasm_bindgen]
pub fn unmount() {
    if PAGE.with(|p| p.borrow_mut().take()).is_some() {
        log::info!("folio-web unmounted");
    }
}
