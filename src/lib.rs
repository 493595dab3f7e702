//! Infinite-loop image carousel with a full-screen pinch/double-tap/pan zoom viewer.
//!
//! The `state` module holds the platform-independent controllers; `components`
//! renders them with yew.

pub mod components;
pub mod error;
pub mod model;
pub mod state;
pub mod util;

pub use error::ConfigError;
pub use model::{AspectRatio, CarouselConfig, Item};
