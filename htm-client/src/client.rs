//! [ModelApiClient] turns each model operation into exactly one request against the engine.

use log::{debug, info, warn};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    api_types::{DataPoint, EventRequest, GetDataResponse, ModelBounds, Reading},
    error::ClientError,
    transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse},
};

/// Client for the HTM engine's model API.
///
/// Holds nothing but the base address and the transport, so a single instance can be
/// shared between tasks. Every operation makes one attempt and reports one outcome.
pub struct ModelApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl ModelApiClient<ReqwestTransport> {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_transport(base_url, ReqwestTransport::new())
    }
}

impl<T: Transport> ModelApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_owned()));
        }

        Ok(ModelApiClient {
            base_url: trimmed.to_owned(),
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Append one reading to model `id` via the `event` endpoint.
    pub async fn post_data(
        &self,
        id: &str,
        value: f64,
        timestamp: i64,
    ) -> Result<(), ClientError> {
        self.post_reading("event", id, &Reading::new(value, timestamp))
            .await
    }

    /// Append one reading to model `id` via the `bulkEvent` endpoint. The wire shape is
    /// the same single reading `post_data` sends.
    pub async fn post_bulk_data(
        &self,
        id: &str,
        value: f64,
        timestamp: i64,
    ) -> Result<(), ClientError> {
        self.post_reading("bulkEvent", id, &Reading::new(value, timestamp))
            .await
    }

    /// Create model `id` expecting input within `[min, max]`. The engine ignores the
    /// request if the model already exists.
    pub async fn create_model(&self, id: &str, min: f64, max: f64) -> Result<(), ClientError> {
        info!("Creating model {}...", id);
        self.post("create", id, &ModelBounds { min, max }).await?;

        Ok(())
    }

    /// Fetch the full history of model `id`, in the order the engine returns it.
    pub async fn get_data(&self, id: &str) -> Result<Vec<DataPoint>, ClientError> {
        let response = self.post("getData", id, &json!({})).await?;
        debug!("getData {} response: {:?}", id, &response.body);

        let body = response.body.ok_or_else(|| {
            ClientError::MalformedResponse("response body is empty or not JSON".to_owned())
        })?;
        if body.get("data").is_none() {
            return Err(ClientError::MalformedResponse(
                "response has no `data` field".to_owned(),
            ));
        }

        let response = serde_json::from_value::<GetDataResponse>(body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

        Ok(response.data)
    }

    /// Timestamp of the most recent point of model `id`, or `None` if it has no data yet.
    /// The timestamp is returned as the engine reported it, usually a `MM/DD/YY HH:mm` string.
    ///
    /// Relies on `getData` listing points oldest first; the order is not checked.
    pub async fn get_last_updated(&self, id: &str) -> Result<Option<Value>, ClientError> {
        let data = self.get_data(id).await?;

        Ok(data.into_iter().last().map(|point| point.timestamp))
    }

    async fn post_reading(
        &self,
        endpoint: &str,
        id: &str,
        reading: &Reading,
    ) -> Result<(), ClientError> {
        let body = EventRequest::try_from(reading)?;
        self.post(endpoint, id, &body).await?;

        Ok(())
    }

    /// Send `body` to `{base}/{endpoint}/{id}` and reject anything but a 2xx answer.
    async fn post<B: Serialize>(
        &self,
        endpoint: &str,
        id: &str,
        body: &B,
    ) -> Result<TransportResponse, ClientError> {
        let request = TransportRequest {
            method: Method::POST,
            url: format!("{}/{}/{}", self.base_url, endpoint, id),
            body: serde_json::to_value(body)?,
        };

        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!("POST {} returned status {}", url, response.status);
            return Err(ClientError::Remote {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }
}
