//! Shared configuration for the relay adapter.
//!
//! Values resolve from command-line flags first, then `RELAY_*` environment
//! variables, then the built-in defaults in [`defaults`]. There are no
//! configuration files: the adapter runs as a short-lived function host where
//! the environment is the natural configuration channel.

mod defaults;
mod logging;
mod store;

use clap::Parser;
use thiserror::Error;
use url::Url;

pub use self::defaults::{
    DEFAULT_DOCUMENT_STORE, DEFAULT_LOG_FILTER, DEFAULT_MANUFACTURER_NAME, DEFAULT_PROFILE_URL,
    default_document_store, default_log_filter, default_log_format, default_profile_url,
};
pub use self::logging::{LogFormat, LogFormatParseError};
pub use self::store::{DocumentSource, DocumentSourceParseError};

/// Resolved adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "relayd", version, about = "Voice-assistant directive relay")]
pub struct Config {
    /// Profile endpoint used to resolve bearer tokens to user identities.
    #[arg(long, env = "RELAY_PROFILE_URL", default_value = DEFAULT_PROFILE_URL)]
    pub profile_url: Url,

    /// Discovery document store: a directory path or an http(s) base URL.
    #[arg(long, env = "RELAY_DOCUMENT_STORE", default_value = DEFAULT_DOCUMENT_STORE)]
    pub document_store: DocumentSource,

    /// Manufacturer name advertised on discovered devices.
    #[arg(long, env = "RELAY_MANUFACTURER_NAME", default_value = DEFAULT_MANUFACTURER_NAME)]
    pub manufacturer_name: String,

    /// Tracing filter expression, for example `relayd=debug,info`.
    #[arg(long, env = "RELAY_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,

    /// Log output format.
    #[arg(long, env = "RELAY_LOG_FORMAT", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_url: default_profile_url(),
            document_store: default_document_store(),
            manufacturer_name: DEFAULT_MANUFACTURER_NAME.to_owned(),
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Cli`] when a flag or environment value fails to
    /// parse, or when `--help`/`--version` was requested.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_iter(std::env::args_os())
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// The first item is treated as the binary name.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Profile endpoint for identity resolution.
    #[must_use]
    pub const fn profile_url(&self) -> &Url {
        &self.profile_url
    }

    /// Discovery document store location.
    #[must_use]
    pub const fn document_store(&self) -> &DocumentSource {
        &self.document_store
    }

    /// Manufacturer name advertised on discovered devices.
    #[must_use]
    pub fn manufacturer_name(&self) -> &str {
        self.manufacturer_name.as_str()
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Flag or environment parsing failed, or help/version output was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),
}
