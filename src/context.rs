//! Cancellation and deadline scope for fetches
//!
//! A [`FetchContext`] pairs a [`CancellationToken`] with an optional deadline.
//! Children share the parent's deadline and are cancelled along with it, but
//! cancelling a child leaves the parent untouched; the bulk coordinator relies
//! on that to abort its own tasks without affecting the caller.

use crate::FetchError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct FetchContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::background()
    }
}

impl FetchContext {
    /// No deadline; cancelled only by an explicit [`FetchContext::cancel`].
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// A child whose deadline is the earlier of the current one and `now + timeout`.
    pub fn timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(existing) if existing <= candidate => existing,
            _ => candidate,
        };

        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drive `fut` until it finishes, the context is cancelled, or the
    /// deadline passes. In the latter two cases `fut` is dropped mid-flight.
    pub async fn run<F, T>(&self, url: &str, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => futures::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(FetchError::Cancelled { url: url.to_string() }),
            _ = deadline => Err(FetchError::Timeout { url: url.to_string() }),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes() {
        let ctx = FetchContext::background();
        let value = ctx.run("u", async { Ok::<_, FetchError>(7) }).await;
        assert_eq!(value.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancelled_context_short_circuits() {
        let ctx = FetchContext::background();
        ctx.cancel();

        let result = ctx
            .run("https://slow.test", async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, FetchError>(())
            })
            .await;

        assert!(matches!(result, Err(FetchError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn test_deadline_fires() {
        let ctx = FetchContext::with_timeout(Duration::from_millis(20));
        let started = std::time::Instant::now();

        let result = ctx
            .run("https://slow.test", async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, FetchError>(())
            })
            .await;

        assert!(matches!(result, Err(FetchError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_child_cancellation_is_one_way() {
        let parent = FetchContext::background();
        let child = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        let other = parent.child();
        parent.cancel();
        assert!(other.is_cancelled());
    }

    #[tokio::test]
    async fn test_timeout_keeps_earlier_deadline() {
        let parent = FetchContext::with_timeout(Duration::from_millis(50));
        let child = parent.timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());

        let tighter = parent.timeout(Duration::from_millis(1));
        assert!(tighter.deadline().unwrap() < parent.deadline().unwrap());
    }
}
