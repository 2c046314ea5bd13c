//! Relay bootstrap orchestration.

use std::io::{BufRead, Write};
use std::sync::Arc;

use relay_config::{Config, ConfigError};
use thiserror::Error;

use crate::envelope::{Stamper, SystemStamper};
use crate::external::{ExternalError, ExternalSystems};
use crate::health::HealthReporter;
use crate::host::{self, HostError, HostSummary};
use crate::invocation::Invocation;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Configuration source, abstracted for tests.
pub trait ConfigLoader: Send + Sync {
    /// Loads the relay configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`ConfigError`].
    fn load(&self) -> Result<Config, ConfigError>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Config::load()
    }
}

/// Loader that always returns a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps a configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Collaborators could not be constructed.
    #[error("failed to prepare external systems: {source}")]
    External {
        /// Underlying collaborator error.
        #[source]
        source: ExternalError,
    },
}

/// A bootstrapped relay ready to serve messages.
pub struct Relay {
    config: Config,
    invocation: Invocation,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Relay {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the invocation boundary.
    #[must_use]
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Serves messages from `input` until it is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] when the streams fail.
    pub fn serve<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<HostSummary, HostError> {
        match host::run(&self.invocation, input, output) {
            Ok(summary) => {
                self.reporter.host_stopped(&summary);
                Ok(summary)
            }
            Err(error) => {
                self.reporter.host_failed(&error);
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("config", &self.config)
            .field("invocation", &self.invocation)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the relay with production collaborators.
///
/// # Errors
///
/// See [`bootstrap_with`].
pub fn bootstrap(reporter: Arc<dyn HealthReporter>) -> Result<Relay, BootstrapError> {
    bootstrap_with(
        &SystemConfigLoader,
        reporter,
        Arc::new(SystemStamper),
        ExternalSystems::from_config,
    )
}

/// Bootstraps the relay using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first failing stage; the reporter is
/// told about the failure before it is returned.
pub fn bootstrap_with<F>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    stamper: Arc<dyn Stamper>,
    build_systems: F,
) -> Result<Relay, BootstrapError>
where
    F: FnOnce(&Config) -> Result<ExternalSystems, ExternalError>,
{
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let systems = match build_systems(&config) {
        Ok(systems) => systems,
        Err(source) => {
            let error = BootstrapError::External { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let invocation =
        Invocation::from_systems(&systems, stamper, config.manufacturer_name().to_owned());
    reporter.bootstrap_succeeded(&config);

    Ok(Relay {
        config,
        invocation,
        telemetry,
        reporter,
    })
}
