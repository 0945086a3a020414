use serde::{Deserialize, Serialize};

use crate::api::error::VCloudAPIError;

/// The `<Error>` payload the server sends with non-2xx responses
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ErrorBody {
    /// Mirrors the HTTP status
    pub major_error_code: Option<i32>,
    /// Server side error name, e.g. `ACCESS_TO_RESOURCE_IS_FORBIDDEN`
    pub minor_error_code: Option<String>,
    pub message: Option<String>,
    pub vendor_specific_error_code: Option<String>,
    pub stack_trace: Option<String>,
}

impl ErrorBody {
    /// Convert into the client error for a response with the given status
    pub fn into_error(self, status: u16) -> VCloudAPIError {
        let message = match (self.minor_error_code, self.message) {
            (Some(minor), Some(message)) => format!("{}: {}", minor, message),
            (Some(minor), None) => minor,
            (None, Some(message)) => message,
            (None, None) => String::new(),
        };
        VCloudAPIError::APIError {
            status,
            major_error_code: self.major_error_code,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::error::VCloudAPIError;
    use crate::api::types::error::ErrorBody;

    #[test]
    fn into_error_joins_codes() {
        let body = ErrorBody {
            major_error_code: Some(403),
            minor_error_code: Some("ACCESS_TO_RESOURCE_IS_FORBIDDEN".to_string()),
            message: Some("No access".to_string()),
            ..Default::default()
        };
        assert_eq!(
            body.into_error(403),
            VCloudAPIError::APIError {
                status: 403,
                major_error_code: Some(403),
                message: "ACCESS_TO_RESOURCE_IS_FORBIDDEN: No access".to_string(),
            }
        );
    }
}
