use crate::store::StoreError;
use bytes::Bytes;
use http::{Response, StatusCode, header};
use http_body_util::Full;
use serde_json::json;

/// An error already shaped for the wire: a status code plus a rendered
/// `{"error": ...}` body.
#[derive(Debug, Clone)]
pub struct ResponseError {
    status: StatusCode,
    body: Full<Bytes>,
}

impl ResponseError {
    pub fn new<T>(status: StatusCode, detail: Option<T>) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            status,
            body: Full::new(match detail {
                Some(e) => Bytes::from(json!({"error": e.as_ref()}).to_string()),
                None => Bytes::new(),
            }),
        }
    }

    /// The catch-all surface for faults with no more specific mapping.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("Internal server error"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Status: {} - {:?}", self.status, self.body)
    }
}

impl std::error::Error for ResponseError {}

impl From<StoreError> for ResponseError {
    fn from(value: StoreError) -> Self {
        tracing::error!("Error updating channels - {value}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("Failed to update channels"),
        )
    }
}

impl From<ResponseError> for Response<Full<Bytes>> {
    fn from(value: ResponseError) -> Self {
        Response::builder()
            .status(value.status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(value.body)
            .unwrap_or_default()
    }
}
