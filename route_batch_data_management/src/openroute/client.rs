use reqwest::{header::AUTHORIZATION, Url};

use crate::{credential::ApiKey, RouteBatchError};

use super::{types::*, RouteProvider, ServiceError};

/// openrouteservice directions client. Holds the key until the client is dropped.
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    key: ApiKey,
}

impl Client {
    pub fn new(base: &str, key: ApiKey) -> Result<Self, RouteBatchError> {
        // Joining relative paths replaces the last segment unless the base ends in '/'
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };

        let base = Url::parse(&normalized).map_err(|e| RouteBatchError::ServiceUrl {
            url: base.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            inner: reqwest::Client::new(),
            base,
            key,
        })
    }

    fn directions_url(&self, request: &DirectionsRequest) -> Result<Url, ServiceError> {
        self.base
            .join(&format!("v2/directions/{}", request.profile))
            .map_err(|e| ServiceError::Url(format!("error joining url: {e}")))
    }
}

impl RouteProvider for Client {
    async fn directions(&self, request: &DirectionsRequest) -> Result<Route, ServiceError> {
        let url = self.directions_url(request)?;

        let response = self
            .inner
            .post(url)
            .header(AUTHORIZATION, self.key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let directions: DirectionsResponse = serde_json::from_str(&body)?;
        directions.routes.into_iter().next().ok_or(ServiceError::NoRoute)
    }
}

/// The service reports errors as `{"error": {"message": ..}}` or `{"error": ".."}`.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("error") {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(error) => error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string()),
        None => body.trim().to_string(),
    }
}
