pub mod client;
pub mod types;

use types::{DirectionsRequest, Route};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("{0}")]
    Url(String),
    #[error("response contained no route")]
    NoRoute,
}

/// Source of directions between two coordinates.
#[allow(async_fn_in_trait)]
pub trait RouteProvider {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Route, ServiceError>;
}
