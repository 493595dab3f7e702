use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::pagination::{ArrowControls, DotPagination, IndexCounter, NumberPagination};
use super::strip::use_loop_strip;
use super::zoom_viewer::ZoomViewer;
use crate::model::{CarouselConfig, Item};
use crate::state::carousel::padded;
use crate::state::{CarouselAction, Direction};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageCarouselProps {
    pub items: Rc<Vec<Item>>,
    #[prop_or_default]
    pub config: CarouselConfig,
}

#[function_component(ImageCarousel)]
pub fn image_carousel(props: &ImageCarouselProps) -> Html {
    let cfg = &props.config;
    let len = props.items.len();
    let spacing = cfg.spacing();
    let ratio = cfg.aspect_ratio();
    let strip_ref = use_node_ref();
    let state = use_loop_strip(strip_ref.clone(), props.items.clone(), spacing, 0);
    let viewer_index = use_state(|| None::<usize>);

    {
        use_effect_with(len, move |&len| {
            log::info!("carousel mounted with {len} items");
            || ()
        });
    }

    // Autoplay: rescheduled whenever the index changes so a manual move never double-advances
    {
        let dispatcher = state.dispatcher();
        let active = state.carousel.autoplay_active(cfg.autoplay) && viewer_index.is_none();
        let interval_ms = cfg.autoplay_delay_ms();
        use_effect_with((active, state.index(), interval_ms), move |&(active, _, interval_ms)| {
            let window = web_sys::window();
            let tick = Closure::wrap(Box::new(move || {
                dispatcher.dispatch(CarouselAction::Tick);
            }) as Box<dyn FnMut()>);
            let handle = match (&window, active) {
                (Some(w), true) => w
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        tick.as_ref().unchecked_ref(),
                        interval_ms,
                    )
                    .ok(),
                _ => None,
            };
            move || {
                if let (Some(w), Some(id)) = (window, handle) {
                    w.clear_interval_with_handle(id);
                }
                let _keep_alive = &tick;
            }
        });
    }

    let on_step = {
        let dispatcher = state.dispatcher();
        Callback::from(move |dir: Direction| dispatcher.dispatch(CarouselAction::Advance(dir)))
    };
    let on_close = {
        let dispatcher = state.dispatcher();
        let viewer_index = viewer_index.clone();
        Callback::from(move |index: usize| {
            dispatcher.dispatch(CarouselAction::JumpTo(index));
            viewer_index.set(None);
        })
    };

    if len == 0 {
        return html! {};
    }

    let index = state.index();
    let aspect = ratio.value();
    let slides = padded(props.items.as_slice());
    let carousel = state.carousel.clone();

    html! {<>
        <div style="position:relative;">
            <div ref={strip_ref} style="display:flex; overflow-x:auto; scroll-snap-type:x mandatory; scrollbar-width:none;">
                { for slides.iter().enumerate().map(|(slot, item)| {
                    let onclick = cfg.tap_to_zoom.then(|| {
                        let viewer_index = viewer_index.clone();
                        let real = carousel.real_index_of_slot(slot);
                        Callback::from(move |_: MouseEvent| {
                            log::info!("opening viewer at {real}");
                            viewer_index.set(Some(real));
                        })
                    });
                    html! {
                        <div key={slot} {onclick} style={format!("flex:0 0 100%; margin-right:{spacing}px; scroll-snap-align:start;")}>
                            <img src={item.image_ref.clone()} draggable="false" style={format!("width:100%; aspect-ratio:{aspect}; object-fit:cover; display:block;")} />
                        </div>
                    }
                }) }
            </div>
            if cfg.index_counter {
                <IndexCounter index={index} len={len} />
            }
            if cfg.arrows {
                <ArrowControls on_step={on_step} />
            }
            if cfg.dot_pagination {
                <DotPagination index={index} len={len} />
            }
            if cfg.number_pagination {
                <NumberPagination index={index} len={len} />
            }
        </div>
        if let Some(start) = *viewer_index {
            <ZoomViewer
                items={props.items.clone()}
                ratio={ratio}
                initial_index={start}
                show_counter={cfg.index_counter}
                on_close={on_close}
            />
        }
    </>}
}
