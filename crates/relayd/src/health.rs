//! Structured health reporting for relay lifecycle events.

use std::sync::Arc;

use relay_config::Config;

use crate::bootstrap::BootstrapError;
use crate::host::{HostError, HostSummary};

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer for lifecycle events.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when the host loop drains its input.
    fn host_stopped(&self, summary: &HostSummary);

    /// Invoked when the host loop aborts.
    fn host_failed(&self, error: &HostError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn host_stopped(&self, summary: &HostSummary) {
        (**self).host_stopped(summary);
    }

    fn host_failed(&self, error: &HostError) {
        (**self).host_failed(error);
    }
}

/// Reporter that records lifecycle events with `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting relay bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            profile_url = %config.profile_url(),
            document_store = %config.document_store(),
            manufacturer = config.manufacturer_name(),
            log_filter = config.log_filter(),
            log_format = %config.log_format(),
            "relay bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "relay bootstrap failed"
        );
    }

    fn host_stopped(&self, summary: &HostSummary) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "host_stopped",
            responses = summary.responses,
            failures = summary.failures,
            "input drained"
        );
    }

    fn host_failed(&self, error: &HostError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "host_failed",
            error = %error,
            "host loop aborted"
        );
    }
}
