use serde::{Deserialize, Serialize};

/// JSON request body sent to the transform endpoint.
///
/// The `mantra` field carries the input text verbatim as it stood when the
/// user submitted it. No trimming or normalization is applied.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    pub mantra: String,
}

/// JSON response body returned by the transform endpoint on HTTP 2xx.
///
/// A well-formed response carries exactly one of the two fields: `ghanam`
/// with the transformed text, or `error` with a human-readable message.
/// Both fields are optional at the wire level so a malformed body can be
/// detected after parsing instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformResponse {
    #[serde(default)]
    pub ghanam: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
