use yew_loop_carousel::components::App;
use yew_loop_carousel::util::init_logging;

fn main() {
    init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
