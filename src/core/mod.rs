pub mod error;

pub use error::{IntelError, IntelResult};
