pub mod errors;
pub mod kv;
pub mod merge;

pub use errors::*;
