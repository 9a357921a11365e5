//! Tests for `RetryPolicy`.

use super::RetryPolicy;
use std::time::Duration;

mod defaults {
    use super::*;

    #[test]
    fn default_sends_each_request_once() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.retries_enabled());
        assert_eq!(policy.backoff_after(1), None);
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::new(), RetryPolicy::default());
        assert_eq!(RetryPolicy::new(), RetryPolicy::SINGLE_ATTEMPT);
    }
}

mod builder {
    use super::*;

    #[test]
    fn with_max_attempts_enables_retries() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert!(policy.retries_enabled());
        assert!(policy.backoff_after(1).is_some());
        assert!(policy.backoff_after(2).is_some());
        assert_eq!(policy.backoff_after(3), None);
    }

    #[test]
    #[should_panic(expected = "max_attempts must be at least 1")]
    fn zero_max_attempts_panics() {
        let _ = RetryPolicy::new().with_max_attempts(0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be positive")]
    fn non_positive_multiplier_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }
}

mod backoff {
    use super::*;

    #[test]
    fn grows_exponentially() {
        let policy = RetryPolicy::new()
            .with_max_attempts(10)
            .with_initial_delay(Duration::from_secs(1))
            .with_multiplier(2.0)
            .with_max_delay(Duration::from_secs(100));

        assert_eq!(policy.backoff_after(1), Some(Duration::from_secs(1)));
        assert_eq!(policy.backoff_after(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.backoff_after(4), Some(Duration::from_secs(8)));
    }

    #[test]
    fn capped_at_max_delay() {
        let policy = RetryPolicy::new()
            .with_max_attempts(10)
            .with_initial_delay(Duration::from_secs(10))
            .with_max_delay(Duration::from_secs(30));

        assert_eq!(policy.backoff_after(6), Some(Duration::from_secs(30)));
    }

    #[test]
    fn nothing_before_the_first_failure() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert_eq!(policy.backoff_after(0), None);
    }
}
