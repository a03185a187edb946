//! Application layer managing state and the conversion workflow.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the workflow state machine and the request lifecycle.

pub mod state;

pub use state::*;
