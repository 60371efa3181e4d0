//! Unit tests for the sliding-window rate limiter

use channel_harvester::harvester::config::calculate_backoff;
use channel_harvester::harvester::RateLimiter;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_calls_within_limit_do_not_wait() {
    let limiter = RateLimiter::new(3, Duration::from_secs(60));
    let start = Instant::now();

    for _ in 0..3 {
        limiter.acquire().await.unwrap();
    }

    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(limiter.available(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_call_over_limit_waits_for_window() {
    let limiter = RateLimiter::new(2, Duration::from_secs(60));
    let start = Instant::now();

    limiter.acquire().await.unwrap();
    limiter.acquire().await.unwrap();
    limiter.acquire().await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_slots_return_after_window() {
    let limiter = RateLimiter::new(2, Duration::from_secs(10));
    limiter.acquire().await.unwrap();
    limiter.acquire().await.unwrap();
    assert_eq!(limiter.available(), 0);

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(limiter.available(), 2);
}

#[test]
fn test_zero_limit_is_clamped() {
    let limiter = RateLimiter::new(0, Duration::from_secs(60));
    assert_eq!(limiter.max_requests(), 1);
}

#[test]
fn test_backoff_doubles_and_caps() {
    assert_eq!(calculate_backoff(0), Duration::from_millis(500));
    assert_eq!(calculate_backoff(1), Duration::from_millis(1000));
    assert_eq!(calculate_backoff(2), Duration::from_millis(2000));
    assert_eq!(calculate_backoff(10), Duration::from_millis(8000));
}
