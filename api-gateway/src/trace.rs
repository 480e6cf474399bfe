//! Request tracing
//!
//! Request spans carry the `x-request-id` assigned by the request-id layer, so
//! every event logged while handling a request (errors included) can be tied
//! back to the id the client sees in the response.

use axum::http::Request;
use tower_http::request_id::RequestId;
use tower_http::trace::MakeSpan;
use tracing::{Level, Span};

/// Builds one span per request, at a configurable level
#[derive(Debug, Clone)]
pub struct RequestIdMakeSpan {
    level: Level,
}

impl RequestIdMakeSpan {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl<B> MakeSpan<B> for RequestIdMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("-");

        // `span!` needs a constant level
        macro_rules! request_span {
            ($level:expr) => {
                tracing::span!(
                    $level,
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            };
        }

        match self.level {
            Level::ERROR => request_span!(Level::ERROR),
            Level::WARN => request_span!(Level::WARN),
            Level::INFO => request_span!(Level::INFO),
            Level::DEBUG => request_span!(Level::DEBUG),
            Level::TRACE => request_span!(Level::TRACE),
        }
    }
}
