pub mod blueiris;
pub mod commands;
pub mod constants;
pub mod error;
pub mod protocol;

pub use blueiris::BlueIris;
pub use commands::*;
pub use error::{BlueIrisError, Result};
