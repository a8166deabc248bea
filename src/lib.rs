//! brushy: a CPU raster drawing engine.
//!
//! Primitives rasterize straight into a [`PixelBuffer`]; composite shapes
//! live in a resolution-independent universe space and are mapped to
//! canvas pixels through a [`RenderContext`] on every frame.

pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod transform;

pub use color::Rgba;
pub use coords::RenderContext;
pub use error::{Error, Result};
pub use scene::Scene;
pub use shapes::Shape;
pub use surface::PixelBuffer;
