//! Two-phase dispatch result.

use relay_types::ResponseEnvelope;

use crate::commands::OutboundCommand;

/// What a handled directive produced.
///
/// The dispatcher never delivers commands itself; the invocation boundary
/// sends [`DispatchOutcome::command`] after the response has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Synchronous response for the platform.
    pub response: ResponseEnvelope,
    /// Command for the device agent, when the directive controls a device.
    pub command: Option<OutboundCommand>,
}

impl DispatchOutcome {
    /// An outcome with nothing to deliver.
    pub fn respond(response: ResponseEnvelope) -> Self {
        Self {
            response,
            command: None,
        }
    }

    /// An outcome that also carries a command.
    pub fn with_command(response: ResponseEnvelope, command: OutboundCommand) -> Self {
        Self {
            response,
            command: Some(command),
        }
    }
}
