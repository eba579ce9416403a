pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod instances;
pub mod orbit;
pub mod scroll;
pub mod stats;

pub use camera::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use driver::*;
pub use error::*;
pub use geometry::*;
pub use grid::*;
pub use instances::*;
pub use orbit::*;
pub use scroll::*;
pub use stats::*;
