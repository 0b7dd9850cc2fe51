//! Retry with exponential backoff around any [`Printer`].

use std::thread;
use std::time::{Duration, SystemTime};

use crate::config::RetryConfig;
use crate::{PrintError, Printer, Reconnectable};

/// Retries transient failures on the same connection.
///
/// A dropped connection stays dropped; use [`ReconnectRetryPrinter`] when
/// the transport can reconnect.
#[derive(Debug)]
pub struct RetryPrinter<P> {
    inner: P,
    policy: RetryConfig,
}

impl<P> RetryPrinter<P> {
    /// Wrap `inner` with `policy`.
    pub fn new(inner: P, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }

    /// The wrapped printer.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Printer> Printer for RetryPrinter<P> {
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        let inner = &mut self.inner;
        with_backoff(&self.policy, inner, |p| p.send_raw(data), |_| {})
    }
}

/// Retries transient failures, reconnecting before each new attempt.
#[derive(Debug)]
pub struct ReconnectRetryPrinter<P> {
    inner: P,
    policy: RetryConfig,
}

impl<P> ReconnectRetryPrinter<P> {
    /// Wrap `inner` with `policy`.
    pub fn new(inner: P, policy: RetryConfig) -> Self {
        Self { inner, policy }
    }

    /// The wrapped printer.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Printer + Reconnectable> Printer for ReconnectRetryPrinter<P> {
    fn send_raw(&mut self, data: &[u8]) -> Result<(), PrintError> {
        with_backoff(
            &self.policy,
            &mut self.inner,
            |p| p.send_raw(data),
            // a failed reconnect surfaces as the next attempt's error
            |p| {
                let _ = p.reconnect();
            },
        )
    }
}

// ─── Backoff loop ───────────────────────────────────────────────────────────

/// Run `op` until it succeeds, fails permanently, or the policy runs out.
///
/// `between` runs after each backoff sleep, before the next attempt.
fn with_backoff<P, T>(
    policy: &RetryConfig,
    target: &mut P,
    mut op: impl FnMut(&mut P) -> Result<T, PrintError>,
    mut between: impl FnMut(&mut P),
) -> Result<T, PrintError> {
    if policy.max_attempts == 0 {
        return Err(PrintError::InvalidConfig(
            "max_attempts must be at least 1".into(),
        ));
    }

    let mut attempt = 0;
    loop {
        let err = match op(target) {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => err,
        };
        attempt += 1;
        if attempt >= policy.max_attempts {
            return Err(PrintError::RetriesExhausted {
                attempts: attempt,
                last_error: Box::new(err),
            });
        }
        thread::sleep(backoff(policy, attempt - 1));
        between(target);
    }
}

/// Delay after the failed attempt number `attempt` (0-based):
/// `min(initial * 2^attempt, max)`, jittered into its upper half.
fn backoff(policy: &RetryConfig, attempt: u32) -> Duration {
    let delay = policy
        .initial_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(policy.max_delay);
    if !policy.jitter {
        return delay;
    }

    let half = delay / 2;
    let span = delay.as_nanos() - half.as_nanos();
    if span == 0 {
        return delay;
    }
    // clock nanoseconds are noisy enough to spread concurrent clients
    let noise = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    let offset = u64::try_from(u128::from(noise) % span).unwrap_or(0);
    half + Duration::from_nanos(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    /// Replays scripted results, then succeeds.
    #[derive(Default)]
    struct Scripted {
        results: VecDeque<Result<(), PrintError>>,
        sends: u32,
        reconnects: u32,
    }

    impl Scripted {
        fn failing(errors: impl IntoIterator<Item = PrintError>) -> Self {
            Self {
                results: errors.into_iter().map(Err).collect(),
                ..Self::default()
            }
        }
    }

    impl Printer for Scripted {
        fn send_raw(&mut self, _data: &[u8]) -> Result<(), PrintError> {
            self.sends += 1;
            self.results.pop_front().unwrap_or(Ok(()))
        }
    }

    impl Reconnectable for Scripted {
        fn reconnect(&mut self) -> Result<(), PrintError> {
            self.reconnects += 1;
            Ok(())
        }
    }

    fn broken_pipe() -> PrintError {
        PrintError::WriteFailed(io::Error::new(io::ErrorKind::BrokenPipe, "mock"))
    }

    fn quick(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            jitter: false,
        }
    }

    #[test]
    fn recovers_after_transient_failures() {
        let scripted = Scripted::failing([broken_pipe(), broken_pipe()]);
        let mut printer = RetryPrinter::new(scripted, quick(3));
        printer.send_zpl("^XA^XZ").unwrap();
        assert_eq!(printer.inner().sends, 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let failures = (0..5).map(|_| broken_pipe());
        let mut printer = RetryPrinter::new(Scripted::failing(failures), quick(2));
        match printer.send_zpl("^XA^XZ") {
            Err(PrintError::RetriesExhausted {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last_error, PrintError::WriteFailed(_)));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
        assert_eq!(printer.inner().sends, 2);
    }

    #[test]
    fn permanent_failure_is_not_retried() {
        let scripted = Scripted::failing([PrintError::InvalidAddress(String::new())]);
        let mut printer = RetryPrinter::new(scripted, quick(5));
        assert!(matches!(
            printer.send_zpl("^XA^XZ"),
            Err(PrintError::InvalidAddress(_))
        ));
        assert_eq!(printer.into_inner().sends, 1);
    }

    #[test]
    fn zero_attempts_is_a_config_error() {
        let mut printer = RetryPrinter::new(Scripted::default(), quick(0));
        assert!(matches!(
            printer.send_zpl("^XA^XZ"),
            Err(PrintError::InvalidConfig(_))
        ));
        assert_eq!(printer.inner().sends, 0);
    }

    #[test]
    fn reconnects_between_attempts_only() {
        let scripted = Scripted::failing([broken_pipe(), broken_pipe()]);
        let mut printer = ReconnectRetryPrinter::new(scripted, quick(4));
        printer.send_zpl("^XA^XZ").unwrap();
        let inner = printer.into_inner();
        assert_eq!((inner.sends, inner.reconnects), (3, 2));
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = RetryConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
            jitter: false,
            ..RetryConfig::default()
        };
        let delays: Vec<_> = (0..4).map(|n| backoff(&policy, n).as_millis()).collect();
        assert_eq!(delays, vec![100, 200, 350, 350]);
        assert_eq!(backoff(&policy, u32::MAX), Duration::from_millis(350));
    }

    #[test]
    fn jitter_stays_in_upper_half() {
        let policy = RetryConfig {
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(1),
            jitter: true,
            ..RetryConfig::default()
        };
        for _ in 0..50 {
            let delay = backoff(&policy, 0);
            assert!(delay >= Duration::from_millis(100) && delay <= Duration::from_millis(200));
        }
    }
}
