use super::carousel::ImageCarousel;
use crate::model::{CarouselConfig, demo_items};
use yew::prelude::*;

/// Reads the host config from `<div id="carousel-config" data-config='{...}'>`, if present.
fn load_config() -> CarouselConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("carousel-config"))
        .and_then(|el| el.get_attribute("data-config"));
    match raw {
        Some(raw) => CarouselConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("{e}; using default carousel config");
            CarouselConfig::default()
        }),
        None => CarouselConfig {
            dot_pagination: true,
            arrows: true,
            index_counter: true,
            tap_to_zoom: true,
            ..Default::default()
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let items = use_memo((), |_| demo_items());
    let config = use_memo((), |_| load_config());

    html! {
        <div id="root" style="max-width:480px; margin:0 auto; padding-bottom:60px;">
            <ImageCarousel items={items.clone()} config={(*config).clone()} />
        </div>
    }
}
