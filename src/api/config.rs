use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::error::VCloudAPIError;

/// Connection settings of a [`VCloudDirector`](crate::VCloudDirector) client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// API root, e.g. `https://vcloud.example.com/api`
    pub endpoint: String,
    /// Sent in the `Accept` header
    pub api_version: String,
    /// Session token sent as `x-vcloud-authorization`
    pub auth_token: Option<String>,
    /// Per-call timeout
    pub timeout_secs: u64,
    /// Page size used when a query does not set one
    pub page_size: Option<i32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: "https://localhost/api".to_string(),
            api_version: "1.5".to_string(),
            auth_token: None,
            timeout_secs: 30,
            page_size: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for the given API root with every other setting defaulted
    pub fn new<E: Into<String>>(endpoint: E) -> Self {
        ClientConfig {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Parse a JSON document, missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, VCloudAPIError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.endpoint_url()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VCloudAPIError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            VCloudAPIError::Decode(format!("{}: {}", path.as_ref().display(), e))
        })?;
        ClientConfig::from_json(&contents)
    }

    /// Read `VCD_ENDPOINT`, `VCD_TOKEN`, `VCD_API_VERSION`,
    /// `VCD_TIMEOUT_SECS` and `VCD_PAGE_SIZE` from the environment
    pub fn from_env() -> Result<Self, VCloudAPIError> {
        ClientConfig::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> Result<Self, VCloudAPIError> {
        let mut config = ClientConfig::default();
        if let Some(endpoint) = var("VCD_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(version) = var("VCD_API_VERSION") {
            config.api_version = version;
        }
        config.auth_token = var("VCD_TOKEN").filter(|t| !t.is_empty());
        if let Some(timeout) = var("VCD_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|_| VCloudAPIError::InvalidParams)?;
        }
        if let Some(size) = var("VCD_PAGE_SIZE") {
            let size: i32 = size.trim().parse().map_err(|_| VCloudAPIError::InvalidParams)?;
            if size < 1 {
                return Err(VCloudAPIError::InvalidParams);
            }
            config.page_size = Some(size);
        }
        config.endpoint_url()?;
        Ok(config)
    }

    /// Per-call timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API root with a trailing slash, so relative paths join below it
    pub fn endpoint_url(&self) -> Result<Url, VCloudAPIError> {
        let mut endpoint = self.endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        Ok(Url::parse(&endpoint)?)
    }

    /// Value of the `Accept` header
    pub fn accept(&self) -> String {
        format!("application/*+xml;version={}", self.api_version)
    }
}
