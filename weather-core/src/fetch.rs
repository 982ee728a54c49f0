use reqwest::{RequestBuilder, StatusCode, header::ACCEPT};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Status and raw body of a completed HTTP exchange. Status interpretation is
/// left to the caller.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Send `request` and read its body, giving up once `timeout` has elapsed.
/// Hitting the deadline drops the in-flight future, which aborts the call.
pub async fn fetch_json(
    request: RequestBuilder,
    timeout: Duration,
) -> Result<FetchedResponse, FetchError> {
    let exchange = async {
        let res = request.header(ACCEPT, "application/json").send().await?;
        let status = res.status();
        let body = res.text().await?;
        Ok::<_, reqwest::Error>(FetchedResponse { status, body })
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(fetched)) => Ok(fetched),
        Ok(Err(e)) if e.is_timeout() => Err(FetchError::Timeout(timeout)),
        Ok(Err(e)) => Err(FetchError::Transport(e)),
        Err(_elapsed) => Err(FetchError::Timeout(timeout)),
    }
}
