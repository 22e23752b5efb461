pub mod display;
pub mod font;

pub use display::{DisplayDriver, PagedTarget};
pub use font::{FontMetrics, FontSize};
