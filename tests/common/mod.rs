//! Shared test helpers.


pub use fixtures::*;
