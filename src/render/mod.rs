//! Scene projection and the surfaces it draws on.

pub mod projection;
/// Rasterization of SVG scenes into pixel frames.
pub mod raster;
pub mod surface;
/// In-memory SVG surface.
pub mod svg;
