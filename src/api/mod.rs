use log::{debug, error, warn};
use url::Url;

use crate::api::config::ClientConfig;
use crate::api::error::VCloudAPIError;
use crate::api::transport::{ReqwestTransport, Transport, TransportResponse};

/// Module holding the API types
pub mod types;

/// Various API Utils
pub mod utils;

/// Error type
pub mod error;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod transport;

/// XML wire format
pub mod xml;

/// Query methods
pub mod query;

/// Entity resolver
pub mod entity;

#[derive(Debug, Clone)]
pub(crate) struct VCloudAPI<T = ReqwestTransport> {
    transport: T,
    pub(crate) config: ClientConfig,
    base: Url,
}

impl VCloudAPI<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, VCloudAPIError> {
        VCloudAPI::with_transport(config, ReqwestTransport::new()?)
    }
}

impl<T: Transport> VCloudAPI<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, VCloudAPIError> {
        let base = config.endpoint_url()?;
        Ok(VCloudAPI {
            transport,
            config,
            base,
        })
    }

    /// Resolve a path or absolute address against the API root
    fn api_url(&self, path: &str) -> Result<Url, VCloudAPIError> {
        Ok(self.base.join(path)?)
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", self.config.accept())];
        if let Some(token) = &self.config.auth_token {
            headers.push(("x-vcloud-authorization", token.clone()));
        }
        headers
    }

    async fn authorized_get(&self, url: Url) -> Result<TransportResponse, VCloudAPIError> {
        debug!("GET {}", url);
        let headers = self.headers();
        match tokio::time::timeout(self.config.timeout(), self.transport.get(url.clone(), &headers))
            .await
        {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                error!("{}: {}", url, e);
                Err(e)
            }
            Err(_) => {
                error!("{}: no answer within {:?}", url, self.config.timeout());
                Err(VCloudAPIError::Timeout)
            }
        }
    }

    /// Body of a successful answer, or the error the status and body describe
    fn successful_body(url: &Url, response: TransportResponse) -> Result<String, VCloudAPIError> {
        if response.is_success() {
            return Ok(response.body);
        }
        warn!("{} result: {}", response.status, response.body);
        match response.status {
            401 | 403 => Err(VCloudAPIError::InvalidCredentials),
            status => match xml::decode_error(&response.body) {
                Ok(body) => Err(body.into_error(status)),
                Err(_) if status >= 500 => {
                    error!("{}: server error {}", url, status);
                    Err(VCloudAPIError::Server)
                }
                Err(_) => Err(VCloudAPIError::APIError {
                    status,
                    major_error_code: None,
                    message: response.body,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::api::config::ClientConfig;
    use crate::api::error::VCloudAPIError;
    use crate::api::transport::{ReqwestTransport, TransportResponse};
    use crate::api::VCloudAPI;

    fn url() -> Url {
        Url::parse("https://vcloud.example.com/api/vms/query").unwrap()
    }

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn headers_carry_version_and_token() {
        let mut config = ClientConfig::new("https://vcloud.example.com/api");
        config.auth_token = Some("token".to_string());
        let api = VCloudAPI::new(config).unwrap();
        let headers = api.headers();
        assert!(headers.contains(&("Accept", "application/*+xml;version=1.5".to_string())));
        assert!(headers.contains(&("x-vcloud-authorization", "token".to_string())));
    }

    #[test]
    fn no_token_no_header() {
        let api = VCloudAPI::new(ClientConfig::new("https://vcloud.example.com/api")).unwrap();
        assert_eq!(api.headers().len(), 1);
    }

    #[test]
    fn status_mapping() {
        type Api = VCloudAPI<ReqwestTransport>;
        assert_eq!(
            Api::successful_body(&url(), response(200, "ok")),
            Ok("ok".to_string())
        );
        assert_eq!(
            Api::successful_body(&url(), response(401, "")),
            Err(VCloudAPIError::InvalidCredentials)
        );
        assert_eq!(
            Api::successful_body(&url(), response(503, "")),
            Err(VCloudAPIError::Server)
        );
        assert_eq!(
            Api::successful_body(&url(), response(400, "bad")),
            Err(VCloudAPIError::APIError {
                status: 400,
                major_error_code: None,
                message: "bad".to_string(),
            })
        );
        let error = r#"<Error majorErrorCode="500" minorErrorCode="INTERNAL_SERVER_ERROR" message="boom"/>"#;
        assert!(matches!(
            Api::successful_body(&url(), response(500, error)),
            Err(VCloudAPIError::APIError { status: 500, .. })
        ));
    }

    #[test]
    fn relative_and_absolute_urls() {
        let api = VCloudAPI::new(ClientConfig::new("https://vcloud.example.com/api")).unwrap();
        assert_eq!(
            api.api_url("vms/query").unwrap().as_str(),
            "https://vcloud.example.com/api/vms/query"
        );
        assert_eq!(
            api.api_url("https://other.example.com/api/query?page=2").unwrap().host_str(),
            Some("other.example.com")
        );
    }
}
