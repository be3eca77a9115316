//! Domain types for the shelf catalog: the [`opus::Opus`] entry, the input
//! rules applied to writes, and the [`store::OpusStore`] backend trait.
//!
//! No HTTP or database code lives here; the API, the store and the web client
//! all build on these types.

pub mod error;
pub mod input;
pub mod opus;
pub mod store;

pub use error::{Error, Result};
