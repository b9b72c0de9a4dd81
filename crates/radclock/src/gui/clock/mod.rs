pub mod model;
pub mod view;

pub use model::State;
pub use view::{CairoTextMetrics, draw};

pub const DEFAULT_SIZE: i32 = 300;
pub const TICK_STROKE_WIDTH: f64 = 5.0;
pub const FONT_FACE: &str = "Sans";
