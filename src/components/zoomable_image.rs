use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, TouchEvent, TouchList};
use yew::prelude::*;

use crate::model::AspectRatio;
use crate::state::{Animator, Effect, GestureEvent, GestureSource, ImageBox, TouchPoint, TouchState, Transform, ZoomEngine};
use crate::util;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomableImageProps {
    pub src: AttrValue,
    pub ratio: AspectRatio,
    pub viewport_width: f64,
    /// Inactive images drop back to idle.
    pub active: bool,
    pub on_zoom_change: Callback<bool>,
}

fn css_transform(t: Transform) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        t.translate_x, t.translate_y, t.scale
    )
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length().min(2))
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint::new(t.identifier(), t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// requestAnimationFrame loop that steps the engine until its tweens finish.
#[derive(Clone)]
struct FrameLoop {
    raf_id: Rc<RefCell<Option<i32>>>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl Animator for FrameLoop {
    fn now_ms(&self) -> f64 {
        util::now_ms()
    }

    fn request_frame(&self) {
        if self.raf_id.borrow().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = self.frame.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                *self.raf_id.borrow_mut() = Some(id);
            }
        }
    }
}

impl FrameLoop {
    fn stop(&self) {
        if let (Some(id), Some(window)) = (self.raf_id.borrow_mut().take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Break the closure <-> loop cycle
        self.frame.borrow_mut().take();
    }
}

#[function_component(ZoomableImage)]
pub fn zoomable_image(props: &ZoomableImageProps) -> Html {
    let container_ref = use_node_ref();
    let image_ref = use_node_ref();
    let engine = {
        let image = ImageBox::new(props.viewport_width, props.ratio);
        use_mut_ref(move || ZoomEngine::new(image))
    };
    let touch_state = use_mut_ref(TouchState::default);
    let reported = use_mut_ref(|| false);

    // Writes the current transform straight to the image and reports zoom changes
    let apply = {
        let engine = engine.clone();
        let image_ref = image_ref.clone();
        let reported = reported.clone();
        let on_zoom_change = props.on_zoom_change.clone();
        Rc::new(move |effect: Effect| {
            let t = engine.borrow().transform();
            if let Some(img) = image_ref.cast::<HtmlElement>() {
                let _ = img.style().set_property("transform", &css_transform(t));
            }
            if let Effect::Zoom(zoomed) = effect {
                let mut last = reported.borrow_mut();
                if *last != zoomed {
                    *last = zoomed;
                    log::debug!("zoom state -> {zoomed}");
                    on_zoom_change.emit(zoomed);
                }
            }
        })
    };

    // Layout changes keep the transform inside the new bounds
    {
        let engine = engine.clone();
        let apply = apply.clone();
        use_effect_with((props.viewport_width, props.ratio), move |&(w, ratio)| {
            engine.borrow_mut().set_image(ImageBox::new(w, ratio));
            apply(Effect::None);
            || ()
        });
    }

    // Leaving view resets to idle
    {
        let engine = engine.clone();
        let apply = apply.clone();
        use_effect_with(props.active, move |&active| {
            if !active {
                engine.borrow_mut().reset();
                apply(Effect::Zoom(false));
            }
            || ()
        });
    }

    {
        let container_ref = container_ref.clone();
        use_effect_with((), move |_| {
            let animator = FrameLoop {
                raf_id: Rc::new(RefCell::new(None)),
                frame: Rc::new(RefCell::new(None)),
            };
            {
                let engine = engine.clone();
                let apply = apply.clone();
                let animator_cb = animator.clone();
                *animator.frame.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
                    *animator_cb.raf_id.borrow_mut() = None;
                    let running = engine.borrow_mut().step(animator_cb.now_ms());
                    apply(Effect::None);
                    if running {
                        animator_cb.request_frame();
                    }
                }) as Box<dyn FnMut(f64)>));
            }

            let on_gesture: Rc<dyn Fn(GestureEvent)> = {
                let engine = engine.clone();
                let apply = apply.clone();
                let animator = animator.clone();
                Rc::new(move |event: GestureEvent| {
                    let effect = engine.borrow_mut().handle(event, animator.now_ms());
                    apply(effect);
                    if engine.borrow().is_animating() {
                        animator.request_frame();
                    }
                })
            };

            let container = container_ref.cast::<HtmlElement>();
            let touch_start_cb = {
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = touch_points(&e.touches());
                    touch_state.borrow_mut().touch_start(&touches, util::now_ms());
                }) as Box<dyn FnMut(_)>)
            };
            let touch_move_cb = {
                let touch_state = touch_state.clone();
                let engine = engine.clone();
                let on_gesture = on_gesture.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = touch_points(&e.touches());
                    let mut ts = touch_state.borrow_mut();
                    ts.touch_move(&touches, &mut |ev: GestureEvent| on_gesture(ev));
                    // Idle single-finger drags belong to the page scroller
                    if ts.is_pinching() || engine.borrow().is_zoomed() {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let touch_end_cb = {
                let touch_state = touch_state.clone();
                let on_gesture = on_gesture.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let remaining = touch_points(&e.touches());
                    touch_state
                        .borrow_mut()
                        .touch_end(&remaining, util::now_ms(), &mut |ev: GestureEvent| on_gesture(ev));
                }) as Box<dyn FnMut(_)>)
            };
            let touch_cancel_cb = {
                let touch_state = touch_state.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    touch_state.borrow_mut().cancel(&mut |ev: GestureEvent| on_gesture(ev));
                }) as Box<dyn FnMut(_)>)
            };

            if let Some(el) = &container {
                for (name, cb) in [
                    ("touchstart", &touch_start_cb),
                    ("touchmove", &touch_move_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_cancel_cb),
                ] {
                    el.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
                        .ok();
                }
            }
            move || {
                if let Some(el) = container {
                    for (name, cb) in [
                        ("touchstart", &touch_start_cb),
                        ("touchmove", &touch_move_cb),
                        ("touchend", &touch_end_cb),
                        ("touchcancel", &touch_cancel_cb),
                    ] {
                        let _ = el.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                    }
                }
                animator.stop();
            }
        });
    }

    let aspect = props.ratio.value();
    html! {
        <div ref={container_ref} style="width:100%; height:100%; display:flex; align-items:center; justify-content:center; overflow:hidden; touch-action:pan-x;">
            <img
                ref={image_ref}
                src={props.src.clone()}
                draggable="false"
                style={format!("width:100%; aspect-ratio:{aspect}; object-fit:contain; transform-origin:center; will-change:transform; user-select:none;")}
            />
        </div>
    }
}
