//! Client for the HTM engine's model API: create models, push readings, read back history.

pub mod api_types;
pub mod client;
pub mod config;
pub mod error;
pub mod timestamp;
pub mod transport;

pub use api_types::{DataPoint, ModelBounds, Reading};
pub use client::ModelApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use transport::{ReqwestTransport, Transport, TransportError};
