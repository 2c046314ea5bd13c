//! Voice-assistant smart-home directive relay.
//!
//! `relayd` receives smart-home directives (device discovery, power,
//! brightness, colour, colour temperature, playback, and account grants),
//! validates them, and produces two results: a synchronous response envelope
//! for the voice platform and, for control directives, a `verb {json}`
//! command placed on the user's outbound queue for the device agent.
//!
//! The crate is organised leaves first:
//!
//! - [`color`] converts HSV colours to RGB.
//! - [`commands`] encodes outbound command messages.
//! - [`discovery`] translates stored discovery documents into device lists.
//! - [`envelope`] builds response envelopes.
//! - [`dispatch`] classifies directives by `(namespace, name)` and runs the
//!   matching handler.
//! - [`invocation`] answers warmups and starts command delivery.
//! - [`host`] runs the JSONL stdin/stdout loop used by the `relayd` binary.
//!
//! Collaborators (identity resolution, the document store, and the command
//! queue) sit behind the traits in [`external`] and are injected at
//! construction. No state survives between messages.

pub mod color;
pub mod commands;
pub mod discovery;
pub mod dispatch;
pub mod envelope;
pub mod external;
pub mod host;
pub mod invocation;
pub mod telemetry;

mod bootstrap;
mod health;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Relay, StaticConfigLoader, SystemConfigLoader, bootstrap,
    bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
