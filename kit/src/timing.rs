//! Cooperative delay.

use std::time::Duration;

/// Suspends the calling task for at least `milliseconds`. Other tasks on the
/// same runtime keep running in the meantime; `wait(0)` returns promptly.
pub async fn wait(milliseconds: u64) {
    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
}

#[cfg(test)]
mod tests {
    use super::wait;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn zero_wait_resolves_promptly() {
        let started = Instant::now();
        wait(0).await;
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn waits_at_least_the_requested_time() {
        let started = Instant::now();
        wait(40).await;
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn sibling_tasks_run_while_waiting() {
        let started = Instant::now();
        let sibling = tokio::spawn(async { Instant::now() });

        wait(200).await;
        let waited = started.elapsed();
        let sibling_ran_at = sibling.await.unwrap().duration_since(started);

        assert!(waited >= Duration::from_millis(200));
        assert!(
            sibling_ran_at < Duration::from_millis(100),
            "sibling only ran after {sibling_ran_at:?}"
        );
    }
}
