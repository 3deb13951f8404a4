//! Client observability metrics
//!
//! Counters and histograms for request outcomes and transport lifecycle.
//! The host process is responsible for installing an exporter.

use std::time::{Duration, Instant};

/// Record request duration
pub fn record_request_duration(operation: &str, duration: Duration) {
    metrics::histogram!(
        "shoal_extension_request_duration_seconds",
        "operation" => operation.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record request success
pub fn record_request_success(operation: &str) {
    metrics::counter!(
        "shoal_extension_requests_total",
        "operation" => operation.to_string(),
        "status" => "ok",
    )
    .increment(1);
}

/// Record request error
pub fn record_request_error(operation: &str, error_type: &str) {
    metrics::counter!(
        "shoal_extension_requests_total",
        "operation" => operation.to_string(),
        "status" => "error",
    )
    .increment(1);

    metrics::counter!(
        "shoal_extension_request_errors_total",
        "operation" => operation.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record a transport (connection pool) being opened
pub fn record_transport_opened() {
    metrics::counter!(
        "shoal_extension_transports_total",
        "event" => "opened",
    )
    .increment(1);
}

/// Record a transport (connection pool) being closed
pub fn record_transport_closed() {
    metrics::counter!(
        "shoal_extension_transports_total",
        "event" => "closed",
    )
    .increment(1);
}

/// Timer for measuring one request
pub struct RequestTimer {
    operation: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            start: Instant::now(),
        }
    }

    /// Record success with duration
    pub fn success(self) {
        record_request_duration(self.operation, self.start.elapsed());
        record_request_success(self.operation);
    }

    /// Record error with duration
    pub fn error(self, error_type: &str) {
        record_request_duration(self.operation, self.start.elapsed());
        record_request_error(self.operation, error_type);
    }

    /// Record the outcome of a finished request and pass it through
    pub fn observe<T>(self, result: crate::error::Result<T>) -> crate::error::Result<T> {
        match &result {
            Ok(_) => self.success(),
            Err(e) => self.error(e.error_type()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtensionError;

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::new("search");
        std::thread::sleep(std::time::Duration::from_millis(1));
        timer.success();
    }

    #[test]
    fn test_observe_passes_through_ok() {
        let timer = RequestTimer::new("index");
        let result: crate::error::Result<u32> = timer.observe(Ok(7));
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_observe_passes_through_err() {
        let timer = RequestTimer::new("index");
        let result: crate::error::Result<u32> =
            timer.observe(Err(ExtensionError::Timeout("30s".into())));
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_counters() {
        // Should not panic without an installed recorder
        record_transport_opened();
        record_transport_closed();
    }
}
