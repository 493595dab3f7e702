use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::model::Item;
use crate::state::{CarouselAction, CarouselState, ScrollCommand};

/// Quiet period after the last `scroll` event before the strip counts as settled.
/// Covers browsers that never fire `scrollend`.
pub const SETTLE_DEBOUNCE_MS: i32 = 100;

fn apply_scroll(el: &Element, cmd: ScrollCommand) {
    let opts = ScrollToOptions::new();
    opts.set_left(cmd.offset);
    opts.set_behavior(if cmd.animated {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Instant
    });
    el.scroll_to_with_scroll_to_options(&opts);
}

/// Drives a horizontally scrolling, snapping strip of padded slides for `items`.
///
/// Measures the slot stride from the strip element (slide width + `spacing`),
/// applies every scroll command the controller issues, and feeds the end of each
/// scroll back in as a settle. Re-measures on window resize.
#[hook]
pub fn use_loop_strip(
    strip_ref: NodeRef,
    items: Rc<Vec<Item>>,
    spacing: f64,
    initial_index: usize,
) -> UseReducerHandle<CarouselState> {
    let len = items.len();
    let state = use_reducer(move || CarouselState::new(len, 0.0));

    // (Re)initialize on every new item list and keep the stride in sync with layout
    {
        let dispatcher = state.dispatcher();
        let strip_ref = strip_ref.clone();
        use_effect_with((items, spacing), move |(items, spacing)| {
            let len = items.len();
            let spacing = *spacing;
            let measure = move || {
                strip_ref
                    .cast::<HtmlElement>()
                    .map(|el| el.client_width() as f64 + spacing)
                    .unwrap_or(0.0)
            };
            let stride = measure();
            log::debug!("strip reset: {len} items, stride {stride}");
            dispatcher.dispatch(CarouselAction::Reset { len, stride });
            if initial_index > 0 {
                dispatcher.dispatch(CarouselAction::JumpTo(initial_index));
            }
            let window = web_sys::window();
            let resize_cb = {
                let dispatcher = dispatcher.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    dispatcher.dispatch(CarouselAction::Resize { stride: measure() });
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(w) = &window {
                w.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(w) = window {
                    let _ = w.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Apply each new scroll command to the DOM
    {
        let strip_ref = strip_ref.clone();
        let command = state.command;
        use_effect_with(state.command_seq, move |_| {
            if let (Some(cmd), Some(el)) = (command, strip_ref.cast::<Element>()) {
                apply_scroll(&el, cmd);
            }
            || ()
        });
    }

    // Settle: resolve the resting index once scrolling stops. `scrollend` where the
    // browser has it, otherwise a debounce on `scroll`. Repeated settles are no-ops.
    {
        let dispatcher = state.dispatcher();
        use_effect_with(len > 0, move |_| {
            let el = strip_ref.cast::<HtmlElement>();
            let window = web_sys::window();
            let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
            let settle: Rc<dyn Fn()> = {
                let el = el.clone();
                Rc::new(move || {
                    if let Some(el) = &el {
                        dispatcher.dispatch(CarouselAction::Settle {
                            offset: el.scroll_left() as f64,
                        });
                    }
                })
            };
            let cancel_pending = {
                let window = window.clone();
                let pending = pending.clone();
                move || {
                    if let (Some(w), Some(id)) = (&window, pending.take()) {
                        w.clear_timeout_with_handle(id);
                    }
                }
            };
            let debounced_cb = {
                let settle = settle.clone();
                let pending = pending.clone();
                Closure::wrap(Box::new(move || {
                    pending.set(None);
                    settle();
                }) as Box<dyn FnMut()>)
            };
            let scroll_cb = {
                let window = window.clone();
                let pending = pending.clone();
                let cancel_pending = cancel_pending.clone();
                let debounced = debounced_cb.as_ref().unchecked_ref::<js_sys::Function>().clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    cancel_pending();
                    if let Some(w) = &window {
                        pending.set(
                            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                                &debounced,
                                SETTLE_DEBOUNCE_MS,
                            )
                            .ok(),
                        );
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let scrollend_cb = {
                let cancel_pending = cancel_pending.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    cancel_pending();
                    settle();
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(el) = &el {
                for (name, cb) in [("scroll", &scroll_cb), ("scrollend", &scrollend_cb)] {
                    el.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                        .ok();
                }
            }
            move || {
                if let Some(el) = el {
                    for (name, cb) in [("scroll", &scroll_cb), ("scrollend", &scrollend_cb)] {
                        let _ = el.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                    }
                }
                cancel_pending();
                drop(debounced_cb);
            }
        });
    }

    state
}
