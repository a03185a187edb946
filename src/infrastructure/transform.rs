use crate::domain::{
    ConversionError, ConversionRequest, ConversionResult, TransformResponse, TransformService,
    interpret_response,
};
use reqwest::blocking::Client;

/// Default transform endpoint, matching the development server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/transform";

/// HTTP implementation of the transformation service.
///
/// Performs a single `POST {"mantra": ...}` exchange per call: no retry,
/// no authentication, no explicit timeout. Any non-2xx status is a failure
/// regardless of body content.
pub struct HttpTransformService {
    client: Client,
    endpoint: String,
}

impl HttpTransformService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl TransformService for HttpTransformService {
    fn transform(&self, mantra: &str) -> ConversionResult {
        let request = ConversionRequest {
            mantra: mantra.to_string(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(ConversionError::transport)?;

        if !response.status().is_success() {
            return Err(ConversionError::NonOkStatus);
        }

        let body: TransformResponse = response.json().map_err(ConversionError::transport)?;
        interpret_response(body)
    }
}
