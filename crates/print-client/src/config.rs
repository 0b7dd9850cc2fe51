//! Connection and retry settings.

use std::time::Duration;

/// Everything a transport needs besides the address.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Socket timeouts.
    pub timeouts: PrinterTimeouts,
    /// Backoff policy for transient failures.
    pub retry: RetryConfig,
}

/// Socket timeouts.
///
/// Labels are small, but a printer busy feeding media can stall the
/// receive window, so writes get more room than connects.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterTimeouts {
    /// Limit for establishing the TCP connection.
    pub connect: Duration,
    /// Limit for a single write to complete.
    pub write: Duration,
}

impl Default for PrinterTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            write: Duration::from_secs(30),
        }
    }
}

/// Exponential backoff policy.
///
/// Only errors for which [`PrintError::is_retryable`](crate::PrintError::is_retryable)
/// holds are retried.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, the first one included. Must be at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each one after.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Spread delays over the upper half of their range.
    pub jitter: bool,
}

impl RetryConfig {
    /// A policy that tries exactly once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}
