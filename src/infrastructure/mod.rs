//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns: the HTTP
//! transform client and the system clipboard.

pub mod clipboard;
pub mod transform;

pub use clipboard::*;
pub use transform::*;
