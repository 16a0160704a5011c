pub mod loading_indicator;
pub mod metadata_display;
pub mod progress_display;

pub use loading_indicator::*;
pub use metadata_display::*;
pub use progress_display::*;
