//! Browser scheduler backed by `requestAnimationFrame`, `setTimeout` and `setInterval`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::schedule::{Cadence, Scheduler, Subscription, Wake};

/// Callback that routes a wake back into the game
pub type Dispatch = Rc<dyn Fn(Wake)>;

/// A live browser callback
enum Handle {
    Frame(i32),
    Timeout(i32),
    Interval(i32, Closure<dyn FnMut()>),
}

type LiveTable = Rc<RefCell<HashMap<u64, Handle>>>;

pub struct BrowserScheduler {
    window: web_sys::Window,
    dispatch: Dispatch,
    next_id: u64,
    /// Outstanding callbacks; one-shots remove themselves when they fire
    live: LiveTable,
    /// Interval closures may be cancelled from inside their own callback;
    /// they are kept alive until the next one-shot fires.
    retired: Rc<RefCell<Vec<Closure<dyn FnMut()>>>>,
}

impl BrowserScheduler {
    pub fn new(window: web_sys::Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            dispatch,
            next_id: 1,
            live: Rc::new(RefCell::new(HashMap::new())),
            retired: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Callback for a one-shot: forget the handle, then dispatch
    fn one_shot(&self, id: u64, wake: Wake) -> impl FnOnce() + 'static {
        let live = Rc::clone(&self.live);
        let retired = Rc::clone(&self.retired);
        let dispatch = Rc::clone(&self.dispatch);
        move || {
            live.borrow_mut().remove(&id);
            retired.borrow_mut().clear();
            dispatch(wake);
        }
    }

    fn register(&self, id: u64, wake: Wake, cadence: Cadence) -> Result<Handle, JsValue> {
        match cadence {
            Cadence::NextFrame => {
                let fire = self.one_shot(id, wake);
                let callback = Closure::once_into_js(move |_time: f64| fire());
                let handle = self
                    .window
                    .request_animation_frame(callback.unchecked_ref())?;
                Ok(Handle::Frame(handle))
            }
            Cadence::After(ms) => {
                let fire = self.one_shot(id, wake);
                let callback = Closure::once_into_js(fire);
                let handle = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.unchecked_ref(),
                        clamp_ms(ms),
                    )?;
                Ok(Handle::Timeout(handle))
            }
            Cadence::Every(ms) => {
                let dispatch = Rc::clone(&self.dispatch);
                let callback = Closure::<dyn FnMut()>::new(move || dispatch(wake));
                let handle = self
                    .window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        clamp_ms(ms),
                    )?;
                Ok(Handle::Interval(handle, callback))
            }
        }
    }
}

fn clamp_ms(ms: u32) -> i32 {
    ms.min(i32::MAX as u32) as i32
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, wake: Wake, cadence: Cadence) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;

        match self.register(id, wake, cadence) {
            Ok(handle) => {
                self.live.borrow_mut().insert(id, handle);
            }
            Err(e) => log::warn!("Failed to schedule {:?}: {:?}", wake, e),
        }
        Subscription(id)
    }

    fn cancel(&mut self, subscription: Subscription) {
        let Some(handle) = self.live.borrow_mut().remove(&subscription.0) else {
            return;
        };
        match handle {
            Handle::Frame(h) => {
                if let Err(e) = self.window.cancel_animation_frame(h) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
            Handle::Timeout(h) => self.window.clear_timeout_with_handle(h),
            Handle::Interval(h, closure) => {
                self.window.clear_interval_with_handle(h);
                self.retired.borrow_mut().push(closure);
            }
        }
    }
}
