// Concrete chart components

pub mod axis;
pub mod gridlines;
pub mod series;

pub use axis::{AxisComponent, Tick};
pub use gridlines::Gridlines;
pub use series::ItemSeries;
