pub mod error_handling;
pub mod request_id;

pub use error_handling::*;
pub use request_id::*;
