pub mod app;
pub mod carousel;
pub mod pagination;
pub mod strip;
pub mod zoom_viewer;
pub mod zoomable_image;

pub use app::App;
pub use carousel::ImageCarousel;
pub use zoom_viewer::ZoomViewer;
pub use zoomable_image::ZoomableImage;
