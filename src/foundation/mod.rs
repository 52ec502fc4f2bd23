/// Geometry re-exports, canvas and colour types.
pub mod core;
/// Error taxonomy shared by every module.
pub mod error;
