use std::error::Error;
use std::fmt;

/// Error enum for the vCloud Director API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VCloudAPIError {
    /// Wrong or expired session token
    InvalidCredentials,
    /// API error - the server answered with a non-success status
    APIError {
        /// HTTP status code
        status: u16,
        /// `majorErrorCode` of the `Error` body, if one was sent
        major_error_code: Option<i32>,
        /// Server supplied message or raw body
        message: String,
    },
    /// Server error without a readable body
    Server,
    /// Payload does not match the expected container/record shape
    Decode(String),
    /// Unable to write a payload
    Encode(String),
    /// Caller bug, e.g. a query page below 1
    Validation(String),
    /// Connection level failure
    Transport(String),
    /// The per-call timeout elapsed
    Timeout,
    /// Invalid parameters
    InvalidParams,
}

impl fmt::Display for VCloudAPIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VCloudAPIError::InvalidCredentials => {
                write!(f, "Invalid Credentials")
            }
            VCloudAPIError::APIError {
                status,
                major_error_code,
                message,
            } => match major_error_code {
                Some(code) => write!(f, "API Error ({}, code {}): {}", status, code, message),
                None => write!(f, "API Error ({}): {}", status, message),
            },
            VCloudAPIError::Server => {
                write!(f, "Server Error")
            }
            VCloudAPIError::Decode(e) => {
                write!(f, "Decode Error: {}", e)
            }
            VCloudAPIError::Encode(e) => {
                write!(f, "Encode Error: {}", e)
            }
            VCloudAPIError::Validation(e) => {
                write!(f, "Validation Error: {}", e)
            }
            VCloudAPIError::Transport(e) => {
                write!(f, "Transport Error: {}", e)
            }
            VCloudAPIError::Timeout => {
                write!(f, "Request Timeout")
            }
            VCloudAPIError::InvalidParams => {
                write!(f, "Invalid Input Parameters")
            }
        }
    }
}

impl Error for VCloudAPIError {}

impl From<quick_xml::Error> for VCloudAPIError {
    fn from(e: quick_xml::Error) -> Self {
        VCloudAPIError::Decode(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for VCloudAPIError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        VCloudAPIError::Decode(e.to_string())
    }
}

impl From<derive_builder::UninitializedFieldError> for VCloudAPIError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        VCloudAPIError::Validation(e.to_string())
    }
}

impl From<String> for VCloudAPIError {
    fn from(e: String) -> Self {
        VCloudAPIError::Validation(e)
    }
}

impl From<url::ParseError> for VCloudAPIError {
    fn from(_: url::ParseError) -> Self {
        VCloudAPIError::InvalidParams
    }
}

impl From<serde_json::Error> for VCloudAPIError {
    fn from(e: serde_json::Error) -> Self {
        VCloudAPIError::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for VCloudAPIError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VCloudAPIError::Timeout
        } else {
            VCloudAPIError::Transport(e.to_string())
        }
    }
}
