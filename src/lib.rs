//! chart_engine: a retained-mode 2D chart core
//!
//! The crate drives layout passes over a set of components (axes, series,
//! decorations) and tells a host-provided scene which drawables to add,
//! remove and reposition. Rendering itself is left to the host.

pub mod chart;
pub mod context;
pub mod data_types;
pub mod diff;
pub mod element;
pub mod error;
pub mod event_bus;
pub mod layout;
pub mod plot_types;
pub mod recycler;
pub mod scales;
pub mod transform;
pub mod utils;
pub mod validation;

pub use chart::{Chart, PassReport};
pub use context::{AxisExtents, PassContext};
pub use data_types::{
    AxisConfig, AxisKind, AxisOrientation, AxisSide, ChartConfig, DataSource, DataSourceOperation,
    Rect, RenderType, SeriesConfig, SeriesKind, Size, Thickness,
};
pub use element::{
    AnimationController, DrawableHandle, ElementFactory, ElementKind, ElementRequest,
    HostServices, NoAnimation, Scene,
};
pub use error::ChartError;
pub use event_bus::{Component, ComponentRole, EventBus, Message, MessageKind};
pub use plot_types::{AxisComponent, Gridlines, ItemSeries};
pub use validation::ValidationResult;
