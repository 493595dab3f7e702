use std::rc::Rc;

use yew::prelude::*;

use super::pagination::IndexCounter;
use super::strip::use_loop_strip;
use super::zoomable_image::ZoomableImage;
use crate::model::{AspectRatio, Item};
use crate::state::carousel::padded;
use crate::util;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomViewerProps {
    pub items: Rc<Vec<Item>>,
    pub ratio: AspectRatio,
    pub initial_index: usize,
    pub show_counter: bool,
    /// Emits the logical index shown when the viewer closes.
    pub on_close: Callback<usize>,
}

/// Full-screen pager of zoomable images. Paging is locked while the visible image is zoomed.
#[function_component(ZoomViewer)]
pub fn zoom_viewer(props: &ZoomViewerProps) -> Html {
    let strip_ref = use_node_ref();
    let len = props.items.len();
    let state = use_loop_strip(strip_ref.clone(), props.items.clone(), 0.0, props.initial_index);
    let is_zoomed = use_state(|| false);
    let viewport_width = use_state(util::viewport_width);

    {
        let viewport_width = viewport_width.clone();
        let strip_ref = strip_ref.clone();
        use_effect_with(state.carousel.stride(), move |_| {
            if let Some(el) = strip_ref.cast::<web_sys::HtmlElement>() {
                viewport_width.set(el.client_width() as f64);
            }
            || ()
        });
    }

    // A page change resets the image that left view; it reports idle on its own,
    // but clear the lock eagerly so the next swipe is not swallowed.
    {
        let is_zoomed = is_zoomed.clone();
        use_effect_with(state.index(), move |_| {
            is_zoomed.set(false);
            || ()
        });
    }

    let on_zoom_change = {
        let is_zoomed = is_zoomed.clone();
        Callback::from(move |z: bool| is_zoomed.set(z))
    };
    let close = {
        let on_close = props.on_close.clone();
        let index = state.index();
        Callback::from(move |_| {
            log::info!("viewer closed at {index}");
            on_close.emit(index)
        })
    };

    let current_slot = state.carousel.current_slot();
    let overflow = if *is_zoomed { "hidden" } else { "auto" };
    let slides = padded(props.items.as_slice());

    html! {<div style="position:fixed; inset:0; background:black; z-index:100;">
        <button onclick={close} style="position:absolute; top:15px; right:15px; z-index:10; padding:10px; background:none; border:none; color:white; font-size:18px; font-weight:bold;">{"Close"}</button>
        <div ref={strip_ref} style={format!("display:flex; width:100%; height:100%; overflow-x:{overflow}; overflow-y:hidden; scroll-snap-type:x mandatory; scrollbar-width:none;")}>
            { for slides.iter().enumerate().map(|(slot, item)| html! {
                <div key={slot} style="flex:0 0 100%; height:100%; scroll-snap-align:start;">
                    <ZoomableImage
                        src={item.image_ref.clone()}
                        ratio={props.ratio}
                        viewport_width={*viewport_width}
                        active={slot == current_slot}
                        on_zoom_change={on_zoom_change.clone()}
                    />
                </div>
            }) }
        </div>
        if props.show_counter && len > 0 {
            <IndexCounter index={state.index()} len={len} bottom_px={20} />
        }
    </div>}
}
