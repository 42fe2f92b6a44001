//! LSP Protocol Implementation
//!
//! Editor front end for the validation engine: owns document state and the
//! debounce timers, and renders outcomes as diagnostics.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
