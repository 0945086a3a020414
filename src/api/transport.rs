use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use url::Url;

use crate::api::error::VCloudAPIError;

/// Status and body of an HTTP answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    #[allow(missing_docs)]
    pub status: u16,
    #[allow(missing_docs)]
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the GET requests of the client
///
/// The default implementation is [`ReqwestTransport`]. Anything able to
/// issue a GET and hand back status and body can be plugged in instead.
pub trait Transport: Send + Sync {
    /// Issue a GET with the given extra headers
    fn get(
        &self,
        url: Url,
        headers: &[(&'static str, String)],
    ) -> impl Future<Output = Result<TransportResponse, VCloudAPIError>> + Send;
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the crate's default headers
    pub fn new() -> Result<Self, VCloudAPIError> {
        Ok(ReqwestTransport {
            client: ReqwestTransport::build_client().build()?,
        })
    }

    /// Wrap an existing client, e.g. one with custom TLS settings
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport { client }
    }

    fn build_client() -> ClientBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("vcloud-query/", env!("CARGO_PKG_VERSION"))),
        );
        reqwest::Client::builder().default_headers(headers)
    }
}

impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: Url,
        headers: &[(&'static str, String)],
    ) -> Result<TransportResponse, VCloudAPIError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
