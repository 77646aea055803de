use serde::Deserialize;

/// Error type for calls to Google APIs.
#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `message` is the API's own
    /// error message when the body carried one.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service-account key could not be read or parsed.
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    /// Signing the OAuth2 assertion failed.
    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// A configured base URL could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A 2xx response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Google JSON error envelope: `{"error": {"message": ...}}`.
///
/// OAuth2 endpoints use `{"error": "...", "error_description": "..."}`
/// instead, so both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Api { error: ApiErrorDetail },
    OAuth {
        error: String,
        error_description: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GoogleError {
    /// Build an [`GoogleError::Api`] from a failed response's status and body.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody::Api { error }) => error.message,
            Ok(ErrorBody::OAuth {
                error,
                error_description,
            }) => error_description.unwrap_or(error),
            Err(_) => format!("HTTP {status}"),
        };
        GoogleError::Api { status, message }
    }

    /// Convert a non-2xx response into an error, passing successful responses through.
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, Self> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::from_response_body(status.as_u16(), &body))
    }
}
