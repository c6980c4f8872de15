use reqwest::Response;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MosaicError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    ExternalService {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} authentication failed: {message}")]
    Auth {
        service: &'static str,
        message: String,
    },

    #[error("LLM request failed: {0}")]
    Llm(String),

    #[error("Insight request failed: {0}")]
    QaService(String),

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MosaicError {
    /// True for failures raised while talking to one of the discussion sources.
    pub fn is_external_service(&self) -> bool {
        matches!(
            self,
            MosaicError::HttpRequest(_)
                | MosaicError::ExternalService { .. }
                | MosaicError::Auth { .. }
        )
    }
}

pub type MosaicResult<T> = Result<T, MosaicError>;

/// Turns a non-success response into `MosaicError::ExternalService`, keeping the body for the log.
pub async fn check_status(service: &'static str, response: Response) -> MosaicResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(MosaicError::ExternalService {
        service,
        status: status.as_u16(),
        body,
    })
}
