//! Fixed categories, layout calibration and session options.

pub mod catalog;
pub mod constants;
pub mod options;
