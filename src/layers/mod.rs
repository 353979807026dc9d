pub mod macros;

pub mod base;
pub mod raster;
pub mod reconcile;
pub mod vector;
