pub mod carousel;
pub mod touch;
pub mod tween;
pub mod zoom;

pub use carousel::{CarouselAction, CarouselState, Direction, LoopCarousel, ScrollCommand};
pub use touch::{GestureSource, TouchPoint, TouchState};
pub use tween::{Animator, Easing, Tween};
pub use zoom::{Effect, GestureEvent, ImageBox, Transform, ZoomEngine};
