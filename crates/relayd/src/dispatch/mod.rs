//! Directive classification, validation, and handling.
//!
//! The dispatcher turns one inbound [`relay_types::Directive`] into a
//! [`DispatchOutcome`]: the synchronous response envelope plus, for control
//! directives, an [`OutboundCommand`](crate::commands::OutboundCommand) for the
//! device agent.
//!
//! ## Routing
//!
//! | namespace | names |
//! |---|---|
//! | `Alexa.Discovery` | `Discover` |
//! | `Alexa.Authorization` | `AcceptGrant` |
//! | `Alexa.PowerController` | `TurnOn`, `TurnOff` |
//! | `Alexa.BrightnessController` | `SetBrightness` |
//! | `Alexa.ColorController` | `SetColor` |
//! | `Alexa.ColorTemperatureController` | `SetColorTemperature` |
//! | `Alexa.PlaybackController` | `Play`, `Pause`, `Stop`, `StartOver`, `Previous`, `Next`, `Rewind`, `FastForward` |
//!
//! Control directives are checked in a fixed order before anything is
//! encoded: endpoint id, bearer token, queue cookie, then payload.

mod errors;
mod outcome;
mod request;
mod router;
mod validation;

pub use self::errors::{DispatchError, DocumentFault};
pub use self::outcome::DispatchOutcome;
pub use self::request::InboundMessage;
pub use self::router::{Dispatcher, document_key};
