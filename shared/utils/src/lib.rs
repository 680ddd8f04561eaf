pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod reconcile;
pub mod sheet;
pub mod validation;

pub use config::*;
pub use error::*;
pub use filter::*;
pub use logging::*;
pub use reconcile::*;
pub use sheet::*;
pub use validation::*;
