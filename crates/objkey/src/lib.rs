//! Composite `namespace/name` keys for cluster objects
mod error;
pub use error::*;
mod key;
pub use key::{ObjectKey, SEPARATOR};
mod parse;
pub use parse::parse;
