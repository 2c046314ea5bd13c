//! Invocation boundary: one inbound message in, one reply out.
//!
//! Warmup probes are answered immediately. Directives go through the
//! [`Dispatcher`]; when the outcome carries a command, delivery is started on
//! a worker thread after the reply has been produced and never affects it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use relay_types::ResponseEnvelope;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::OutboundCommand;
use crate::dispatch::{DispatchError, Dispatcher, InboundMessage};
use crate::envelope::Stamper;
use crate::external::{CommandQueue, ExternalSystems};

/// Tracing target for invocation handling.
pub(crate) const INVOCATION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::invocation");

/// Queue name that suppresses delivery.
pub const DROP_QUEUE: &str = "drop";

/// Reply sent for warmup probes.
pub const WARMUP_REPLY: &str = "ok";

/// Reply returned to the platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Plain acknowledgement, used for warmups.
    Ack(&'static str),
    /// Directive response envelope.
    Response(Box<ResponseEnvelope>),
}

/// Handle for an in-flight command delivery.
#[derive(Debug, Default)]
pub struct Delivery {
    handle: Option<JoinHandle<()>>,
}

impl Delivery {
    /// A delivery that was never started.
    pub fn none() -> Self {
        Self { handle: None }
    }

    /// Returns true when a worker thread was started.
    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    /// Returns true when no worker is running.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the worker to finish.
    ///
    /// Delivery failures are logged by the worker itself; this only reports a
    /// worker that panicked.
    pub fn join(self) {
        if let Some(handle) = self.handle
            && handle.join().is_err()
        {
            warn!(target: INVOCATION_TARGET, "delivery worker panicked");
        }
    }
}

/// Result of handling one message.
#[derive(Debug)]
pub struct Handled {
    /// Reply for the platform.
    pub reply: Reply,
    /// Delivery started for the outbound command, if any.
    pub delivery: Delivery,
}

/// Handles inbound messages against a dispatcher and a command queue.
pub struct Invocation {
    dispatcher: Dispatcher,
    queue: Arc<dyn CommandQueue>,
}

impl Invocation {
    /// Creates an invocation boundary from its parts.
    pub fn new(dispatcher: Dispatcher, queue: Arc<dyn CommandQueue>) -> Self {
        Self { dispatcher, queue }
    }

    /// Builds the dispatcher and queue from a collaborator set.
    pub fn from_systems(
        systems: &ExternalSystems,
        stamper: Arc<dyn Stamper>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self::new(
            Dispatcher::new(systems, stamper, manufacturer),
            Arc::clone(&systems.queue),
        )
    }

    /// Parses and handles one raw message line.
    ///
    /// # Errors
    ///
    /// Returns the parse or dispatch failure.
    pub fn handle_line(&self, line: &[u8]) -> Result<Handled, DispatchError> {
        self.handle(InboundMessage::parse(line)?)
    }

    /// Handles one classified message.
    ///
    /// # Errors
    ///
    /// Returns the dispatch failure; no delivery is started in that case.
    pub fn handle(&self, message: InboundMessage) -> Result<Handled, DispatchError> {
        let directive = match message {
            InboundMessage::Warmup => {
                debug!(target: INVOCATION_TARGET, "warmup probe");
                return Ok(Handled {
                    reply: Reply::Ack(WARMUP_REPLY),
                    delivery: Delivery::none(),
                });
            }
            InboundMessage::Directive(directive) => directive,
        };

        let outcome = self.dispatcher.dispatch(&directive).inspect_err(|error| {
            warn!(
                target: INVOCATION_TARGET,
                namespace = directive.header.namespace.as_str(),
                name = directive.header.name.as_str(),
                error_kind = error.kind(),
                %error,
                "directive failed"
            );
        })?;

        let delivery = match outcome.command {
            Some(command) => self.deliver(command),
            None => Delivery::none(),
        };
        Ok(Handled {
            reply: Reply::Response(Box::new(outcome.response)),
            delivery,
        })
    }

    fn deliver(&self, command: OutboundCommand) -> Delivery {
        if command.queue == DROP_QUEUE {
            info!(
                target: INVOCATION_TARGET,
                body = command.body.as_str(),
                "queue is the drop sentinel; command discarded"
            );
            return Delivery::none();
        }

        let queue = Arc::clone(&self.queue);
        let spawned = thread::Builder::new()
            .name("relay-delivery".to_owned())
            .spawn(move || send(queue.as_ref(), &command));
        match spawned {
            Ok(handle) => Delivery {
                handle: Some(handle),
            },
            Err(error) => {
                warn!(target: INVOCATION_TARGET, %error, "failed to start delivery worker");
                Delivery::none()
            }
        }
    }
}

fn send(queue: &dyn CommandQueue, command: &OutboundCommand) {
    match queue.send(&command.queue, &command.body) {
        Ok(()) => debug!(
            target: INVOCATION_TARGET,
            queue = command.queue.as_str(),
            "command delivered"
        ),
        Err(error) => warn!(
            target: INVOCATION_TARGET,
            queue = command.queue.as_str(),
            %error,
            "command delivery failed"
        ),
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
