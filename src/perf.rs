use crate::constants::*;
use crate::core::PerfSample;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type EntriesCallback =
    Closure<dyn FnMut(web::PerformanceObserverEntryList, web::PerformanceObserver)>;

/// Logs page vitals to the console until dropped.
pub struct PerfHandle {
    observer: web::PerformanceObserver,
    _callback: EntriesCallback,
}

fn sample(entry: &web::PerformanceEntry) -> Option<PerfSample> {
    let value = js_sys::Reflect::get(entry, &JsValue::from_str("value"))
        .ok()
        .and_then(|v| v.as_f64());
    PerfSample::from_entry(&entry.name(), &entry.entry_type(), value, entry.duration())
}

pub fn mount() -> anyhow::Result<PerfHandle> {
    let callback: EntriesCallback = Closure::wrap(Box::new(
        |list: web::PerformanceObserverEntryList, _observer: web::PerformanceObserver| {
            for entry in list.get_entries().iter() {
                let Ok(entry) = entry.dyn_into::<web::PerformanceEntry>() else {
                    continue;
                };
                if let Some(s) = sample(&entry) {
                    log::info!("[perf] {}", s);
                }
            }
        },
    )
        as Box<dyn FnMut(web::PerformanceObserverEntryList, web::PerformanceObserver)>);

    let observer = web::PerformanceObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("PerformanceObserver: {:?}", e))?;

    let entry_types: js_sys::Array = PERF_ENTRY_TYPES
        .iter()
        .map(|t| JsValue::from_str(t))
        .collect();
    observer.observe(&web::PerformanceObserverInit::new(&entry_types));

    log::debug!("[perf] observing {:?}", PERF_ENTRY_TYPES);
    Ok(PerfHandle {
        observer,
        _callback: callback,
    })
}

impl Drop for PerfHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
