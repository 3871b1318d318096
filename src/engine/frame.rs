use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Host capability: run a callback once, on the next display frame. The
/// callback receives the host's frame timestamp in milliseconds.
pub trait FrameScheduler {
    fn request_frame(&self, callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue>;
}

impl FrameScheduler for web_sys::Window {
    fn request_frame(&self, callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
        self.request_animation_frame(callback.as_ref().unchecked_ref())
    }
}

/// Calls `on_frame` once per display frame for the rest of the session.
///
/// There is no stop handle. A scheduling failure inside the loop is thrown
/// to the host and ends the loop.
pub fn run_frame_loop<S, F>(scheduler: Rc<S>, mut on_frame: F) -> Result<(), JsValue>
where
    S: FrameScheduler + 'static,
    F: FnMut(f64) + 'static,
{
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let host = scheduler.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        on_frame(timestamp);

        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = host.request_frame(callback) {
                log::error!("failed to schedule next frame: {:?}", err);
                wasm_bindgen::throw_val(err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g.borrow();
    let callback = first.as_ref().ok_or("Frame callback missing")?;
    scheduler.request_frame(callback)?;
    Ok(())
}

/// Converts host frame timestamps into seconds elapsed since the first frame.
#[derive(Debug, Default)]
pub struct FrameClock {
    start_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&mut self, timestamp_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(timestamp_ms);
        ((timestamp_ms - start) / 1000.0).max(0.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_time_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed(12_345.0), 0.0);
    }

    #[test]
    fn elapsed_is_in_seconds() {
        let mut clock = FrameClock::new();
        clock.elapsed(1_000.0);
        assert!((clock.elapsed(3_500.0) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn never_negative() {
        let mut clock = FrameClock::new();
        clock.elapsed(5_000.0);
        assert_eq!(clock.elapsed(4_000.0), 0.0);
    }
}
