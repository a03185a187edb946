//! M2G - Terminal Mantra to Ghanam Converter
//!
//! A terminal client for converting vedic mantras to the ghanam recitation
//! style. The transformation itself runs on an external HTTP service; this
//! crate owns the conversion workflow, the request/response contract, and
//! the terminal user interface.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
