#![expect(clippy::unwrap_used, reason = "test code")]

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalError;

#[test]
fn memory_allows_up_to_limit() {
    let limiter = Limiter::memory(10);
    assert!(limiter.use_units(4).is_ok());
    assert!(limiter.use_units(6).is_ok());
    assert_eq!(limiter.used(), 10);
    assert_eq!(
        limiter.use_units(1),
        Err(EvalError::ResourceExceeded {
            resource: "memory alloc"
        })
    );
}

#[test]
fn exhaustion_is_terminal() {
    let limiter = Limiter::memory(1);
    assert!(limiter.use_units(5).is_err());
    assert!(limiter.check().is_err());
    assert!(limiter.use_units(0).is_err());
}

#[test]
fn counter_saturates() {
    let limiter = Limiter::memory(u64::MAX);
    assert!(limiter.use_units(u64::MAX).is_ok());
    assert!(limiter.use_units(u64::MAX).is_ok());
    assert_eq!(limiter.used(), u64::MAX);
}

#[test]
fn elapsed_deadline_trips() {
    let limiter = Limiter::render_deadline(Duration::ZERO);
    std::thread::sleep(Duration::from_millis(2));
    let err = limiter.check().unwrap_err();
    assert_eq!(err.to_string(), "template render limit exceeded");
}

#[test]
fn generous_deadline_passes() {
    let limiter = Limiter::render_deadline(Duration::from_secs(3600));
    assert!(limiter.check().is_ok());
    assert!(limiter.use_units(1_000).is_ok());
    assert_eq!(limiter.used(), 0);
}

#[test]
fn huge_deadline_is_unbounded() {
    assert!(Limiter::render_deadline(Duration::MAX).check().is_ok());
    assert!(Limiter::unbounded(MEMORY).use_units(u64::MAX).is_ok());
}
