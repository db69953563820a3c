//! The HTTP leaf the client sits on. Anything that can move a JSON body to a URL and
//! hand back a status plus parsed body can back a [ModelApiClient](crate::client::ModelApiClient).

use std::error::Error;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method};
use serde_json::Value;
use thiserror::Error;

/// A request could not be completed at all. Wraps whatever the transport reported.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportError(Box<dyn Error + Send + Sync>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        TransportError(err.into())
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
        self.0
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,

    /// Parsed JSON body. `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport is the trait for types that can deliver a single request to the engine.
/// Implementations make exactly one attempt; retries and timeouts belong to them or
/// to the caller, never to the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// The default transport, backed by a shared [reqwest::Client].
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. one built with a request timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!("{} {}", &request.method, &request.url);

        let response = self
            .client
            .request(request.method, &request.url)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes).ok();

        Ok(TransportResponse { status, body })
    }
}
