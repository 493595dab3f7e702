use crate::state::carousel::{counter_label, dot_states};
use crate::state::Direction;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IndexCounterProps {
    pub index: usize,
    pub len: usize,
    #[prop_or(10)]
    pub bottom_px: u32,
}

#[function_component(IndexCounter)]
pub fn index_counter(props: &IndexCounterProps) -> Html {
    html! {<div style={format!("position:absolute; bottom:{}px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.5); padding:4px 12px; border-radius:12px; color:#fff; font-weight:bold; font-size:14px;", props.bottom_px)}>
        { counter_label(props.index, props.len) }
    </div>}
}

#[derive(Properties, PartialEq, Clone)]
pub struct PaginationProps {
    pub index: usize,
    pub len: usize,
}

#[function_component(DotPagination)]
pub fn dot_pagination(props: &PaginationProps) -> Html {
    html! {<div style="position:absolute; bottom:-10px; width:100%; display:flex; justify-content:center;">
        { for dot_states(props.index, props.len).into_iter().map(|active| {
            let bg = if active { "#fff" } else { "#888" };
            html! { <span style={format!("width:8px; height:8px; border-radius:4px; margin:0 4px; background:{bg};")}></span> }
        }) }
    </div>}
}

#[function_component(NumberPagination)]
pub fn number_pagination(props: &PaginationProps) -> Html {
    html! {<div style="position:absolute; bottom:-50px; width:100%; display:flex; justify-content:center; align-items:center;">
        { for dot_states(props.index, props.len).into_iter().enumerate().map(|(i, active)| {
            let (bg, fg, border) = if active {
                ("#fff", "rgba(128,128,128,0.4)", "1px solid rgba(128,128,128,0.4)")
            } else {
                ("rgba(128,128,128,0.4)", "#fff", "none")
            };
            html! { <span style={format!("width:28px; height:28px; border-radius:14px; margin:0 4px; display:flex; align-items:center; justify-content:center; font-weight:bold; font-size:14px; background:{bg}; color:{fg}; border:{border};")}>
                { i + 1 }
            </span> }
        }) }
    </div>}
}

#[derive(Properties, PartialEq, Clone)]
pub struct ArrowControlsProps {
    pub on_step: Callback<Direction>,
}

#[function_component(ArrowControls)]
pub fn arrow_controls(props: &ArrowControlsProps) -> Html {
    let prev = {
        let cb = props.on_step.clone();
        Callback::from(move |_| cb.emit(Direction::Prev))
    };
    let next = {
        let cb = props.on_step.clone();
        Callback::from(move |_| cb.emit(Direction::Next))
    };
    let btn = "width:35px; height:35px; border-radius:20px; border:2px solid #fff; background:#ccc; color:#fff; font-size:22px; pointer-events:auto;";
    html! {<div style="position:absolute; inset:0 20px; display:flex; justify-content:space-between; align-items:center; pointer-events:none;">
        <button onclick={prev} style={btn}>{"<"}</button>
        <button onclick={next} style={btn}>{">"}</button>
    </div>}
}
