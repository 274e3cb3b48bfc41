// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// Retry helper with exponential backoff for GitHub API stages.
///
/// Transient transport failures are retried a bounded number of times; the
/// final error is returned once attempts are exhausted.
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::Error;

/// Backoff parameters applied to one retried operation.
#[derive(Debug, Clone,)]
pub struct RetryPolicy
{
    /// Total attempts before the last error is surfaced.
    pub max_attempts:  u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Factor applied to the delay after every failed attempt.
    pub multiplier:    f64,
}

impl Default for RetryPolicy
{
    fn default() -> Self
    {
        Self {
            max_attempts: 3, initial_delay: Duration::from_secs(1,), multiplier: 2.0,
        }
    }
}

/// Runs an async operation under the provided retry policy.
///
/// # Errors
///
/// Returns the error from the final attempt when every attempt fails.
pub async fn retry_with_backoff<F, Fut, T,>(
    policy: &RetryPolicy,
    operation: &str,
    mut action: F,
) -> Result<T, Error,>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error,>,>,
{
    let mut attempt = 1;
    let mut delay = policy.initial_delay;

    loop {
        match action().await {
            Ok(value,) => {
                if attempt > 1 {
                    debug!("{operation} succeeded on attempt {attempt}");
                }
                return Ok(value,);
            }
            Err(error,) => {
                if attempt >= policy.max_attempts {
                    warn!(
                        "{operation} failed after {} attempts: {error}",
                        policy.max_attempts
                    );
                    return Err(error,);
                }

                warn!(
                    "{operation} failed on attempt {attempt}/{}: {error}. Retrying in {delay:?}",
                    policy.max_attempts
                );

                sleep(delay,).await;
                delay = delay.mul_f64(policy.multiplier,);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use std::{
        sync::{
            Arc,
            atomic::{AtomicU32, Ordering},
        },
        time::Duration,
    };

    use super::{RetryPolicy, retry_with_backoff};
    use crate::error::Error;

    fn fast_policy(max_attempts: u32,) -> RetryPolicy
    {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1,),
            multiplier: 2.0,
        }
    }

    #[test]
    fn default_policy_values()
    {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_secs(1));
        assert_eq!(policy.multiplier, 2.0);
    }

    #[tokio::test]
    async fn succeeds_without_retrying()
    {
        let policy = fast_policy(3,);
        let value = retry_with_backoff(&policy, "test", || async { Ok::<_, Error,>(42,) },)
            .await
            .expect("should succeed",);
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures()
    {
        let policy = fast_policy(3,);
        let calls = Arc::new(AtomicU32::new(0,),);
        let counter = calls.clone();

        let value = retry_with_backoff(&policy, "test", move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst,) < 2 {
                    Err(Error::api("temporary failure",),)
                } else {
                    Ok(7,)
                }
            }
        },)
        .await
        .expect("should succeed after retries",);

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn surfaces_the_final_error()
    {
        let policy = fast_policy(2,);
        let calls = Arc::new(AtomicU32::new(0,),);
        let counter = calls.clone();

        let result = retry_with_backoff(&policy, "test", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst,);
                Err::<u32, _,>(Error::api("persistent failure",),)
            }
        },)
        .await;

        assert!(result.is_err(), "should fail after max attempts",);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
