//! Pure layout: per-year totals and flow geometry. Nothing here touches a render surface.

pub mod geometry;
pub mod totals;
