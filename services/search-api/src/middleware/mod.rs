pub mod error_logging;
pub mod request_id;

pub use error_logging::*;
pub use request_id::*;
