use anyhow::{Context, Result};
use serde::Deserialize;

use crate::client::ModelApiClient;

/// Client settings read from `HTM_ENGINE_*` environment variables.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the engine, from `HTM_ENGINE_URL`.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    String::from("http://127.0.0.1:8080")
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig { url: default_url() }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        envy::prefixed("HTM_ENGINE_")
            .from_env::<ClientConfig>()
            .context("failed to read HTM_ENGINE_* environment")
    }

    /// Same as [ClientConfig::from_env] over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed("HTM_ENGINE_")
            .from_iter::<_, ClientConfig>(vars)
            .context("failed to read HTM_ENGINE_* environment")
    }

    pub fn into_client(self) -> Result<ModelApiClient> {
        ModelApiClient::new(&self.url)
            .with_context(|| format!("invalid engine URL {:?}", self.url))
    }
}
