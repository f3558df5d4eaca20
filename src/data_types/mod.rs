pub mod axis;
pub mod datasource;
pub mod geometry;
pub mod plot_configs;
pub mod state;

// Re-export everything for compatibility
pub use axis::*;
pub use datasource::*;
pub use geometry::*;
pub use plot_configs::*;
pub use state::*;
