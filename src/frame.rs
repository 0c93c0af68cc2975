use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop calling `on_frame(dt_sec)` until dropped.
pub struct FrameLoop {
    tick: TickSlot,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f32) + 'static) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let handle_clone = handle.clone();
        let mut last_instant = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = Instant::now();
            let dt_sec = (now - last_instant).as_secs_f32();
            last_instant = now;
            on_frame(dt_sec);
            handle_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        handle.set(request_frame(&tick));
        Self { tick, handle }
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|e| log::error!("[frame] requestAnimationFrame failed: {:?}", e))
        .ok()
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(window), Some(h)) = (web::window(), self.handle.take()) {
            _ = window.cancel_animation_frame(h);
        }
        // breaks the closure's reference cycle through `tick`
        self.tick.borrow_mut().take();
    }
}
