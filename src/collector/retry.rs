use std::fmt::Display;
use std::future::Future;

/// Runs `operation` until it succeeds or `attempts` tries have been made
///
/// The closure receives the 1-based attempt number. Failures before the last
/// attempt are logged; the last failure is returned. There is no delay
/// between attempts.
pub async fn retry_bounded<T, E, F, Fut>(attempts: usize, mut operation: F) -> Result<T, E>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::warn!("Attempt {}/{} failed, retrying: {}", attempt, attempts, e);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
