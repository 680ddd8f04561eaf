pub mod health;
pub mod leftovers;
pub mod packing;
pub mod upload;

pub use health::*;
pub use leftovers::*;
pub use packing::*;
