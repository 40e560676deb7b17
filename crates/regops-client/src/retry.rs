//! Transport-level retry for requests that never got an answer.
//!
//! A connection refused, a DNS failure, or a timeout may be replayed; a
//! server that answered made its decision, so any response comes back
//! as-is regardless of status. Delays double from 200 ms between
//! attempts.

use std::time::Duration;

/// Retry attempts after the initial send.
const MAX_RETRIES: u32 = 3;

const BASE_DELAY_MS: u64 = 200;

/// Call `send` until a response arrives, up to `MAX_RETRIES` replays.
///
/// `endpoint` is the operation label (e.g. `GET /api/risk/risks`) carried
/// into the retry warnings, matching the label on the eventual error.
pub(crate) async fn retry_send<F, Fut>(
    endpoint: &str,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut delay = Duration::from_millis(BASE_DELAY_MS);
    for attempt in 1..=MAX_RETRIES {
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(err) => {
                tracing::warn!(
                    %endpoint,
                    attempt,
                    max_retries = MAX_RETRIES,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "request produced no response; retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }
    send().await
}
