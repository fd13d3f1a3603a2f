//! Configuration types
//!
//! Board-agnostic settings, loadable from TOML or persisted as postcard data.

pub mod types;

pub use types::*;
