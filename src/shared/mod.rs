/// Shared utilities: the crate-wide Result alias and error types.
pub mod error;
pub mod result;

pub use result::Result;
