//! Transformation service contract for the mantra converter.
//!
//! This module defines the boundary between the conversion workflow and the
//! external service that performs the actual mantra-to-ghanam transformation.
//! The workflow treats the service as an opaque request/response exchange;
//! the HTTP implementation lives in the infrastructure layer.

use super::errors::{ConversionError, ConversionResult};
use super::models::TransformResponse;

/// A service that transforms a mantra into its ghanam rendition.
///
/// Implementations must be shareable across threads: the application
/// dispatches each transformation on a short-lived worker thread so the
/// terminal stays responsive while a request is outstanding.
///
/// The returned result is final for the request: `Ok` carries the ghanam
/// text, `Err` carries a user-visible failure. Implementations must not
/// panic on malformed server behavior; every outcome maps to a variant of
/// [`ConversionError`].
pub trait TransformService: Send + Sync {
    /// Transforms the given mantra, blocking until the exchange completes.
    ///
    /// # Arguments
    ///
    /// * `mantra` - Input text, passed through verbatim (empty is legal)
    fn transform(&self, mantra: &str) -> ConversionResult;
}

/// Maps a parsed 2xx response body onto a conversion outcome.
///
/// A body with a `ghanam` field is a success; the field wins if the server
/// nonsensically sends both. A body with only an `error` field is an
/// application-level failure carrying that message verbatim. A body with
/// neither field violates the protocol and maps to a fixed failure message.
///
/// # Examples
///
/// ```
/// use m2g::domain::{interpret_response, ConversionError, TransformResponse};
///
/// let body = TransformResponse { ghanam: Some("Om Om".into()), error: None };
/// assert_eq!(interpret_response(body), Ok("Om Om".to_string()));
///
/// let body = TransformResponse { ghanam: None, error: None };
/// assert_eq!(interpret_response(body), Err(ConversionError::UnexpectedResponse));
/// ```
pub fn interpret_response(response: TransformResponse) -> ConversionResult {
    if let Some(ghanam) = response.ghanam {
        Ok(ghanam)
    } else if let Some(error) = response.error {
        Err(ConversionError::Service(error))
    } else {
        Err(ConversionError::UnexpectedResponse)
    }
}
