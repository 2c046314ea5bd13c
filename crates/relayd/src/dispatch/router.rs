//! Namespace and name routing for directive dispatch.
//!
//! Directives are keyed by `(namespace, name)`. The namespace is parsed into a
//! [`Namespace`], then the name is checked against the routing context for
//! that namespace. Unknown pairs are rejected with
//! [`DispatchError::UnsupportedDirective`] before any handler runs.

use std::sync::Arc;

use relay_types::{
    AcceptGrantPayload, BrightnessPayload, ColorPayload, ColorTemperaturePayload, Directive,
    DiscoverPayload, DiscoveryDocument, Namespace,
};
use serde_json::json;
use tracing::{debug, info};

use super::errors::DispatchError;
use super::outcome::DispatchOutcome;
use super::validation::{self, ControlTarget};
use crate::commands::{
    OutboundCommand, brightness_message, color_message, color_temperature_message,
    playback_control_message, turn_off_message, turn_on_message,
};
use crate::discovery::to_device_list;
use crate::envelope::{ChangedProperty, EnvelopeBuilder, Stamper};
use crate::external::{DocumentStore, ExternalSystems, IdentityResolver};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Builds the document store key for a user.
pub fn document_key(user_id: &str) -> String {
    format!("discovery/{user_id}.json")
}

/// Directive names accepted within one namespace.
struct NamespaceRoutes {
    namespace: Namespace,
    known_names: &'static [&'static str],
}

impl NamespaceRoutes {
    const DISCOVERY: Self = Self {
        namespace: Namespace::Discovery,
        known_names: &["Discover"],
    };

    const AUTHORIZATION: Self = Self {
        namespace: Namespace::Authorization,
        known_names: &["AcceptGrant"],
    };

    const POWER: Self = Self {
        namespace: Namespace::PowerController,
        known_names: &["TurnOn", "TurnOff"],
    };

    const BRIGHTNESS: Self = Self {
        namespace: Namespace::BrightnessController,
        known_names: &["SetBrightness"],
    };

    const COLOR: Self = Self {
        namespace: Namespace::ColorController,
        known_names: &["SetColor"],
    };

    const COLOR_TEMPERATURE: Self = Self {
        namespace: Namespace::ColorTemperatureController,
        known_names: &["SetColorTemperature"],
    };

    const PLAYBACK: Self = Self {
        namespace: Namespace::PlaybackController,
        known_names: &[
            "Play",
            "Pause",
            "Stop",
            "StartOver",
            "Previous",
            "Next",
            "Rewind",
            "FastForward",
        ],
    };

    fn check(&self, name: &str) -> Result<(), DispatchError> {
        if self.known_names.contains(&name) {
            Ok(())
        } else {
            Err(DispatchError::unsupported_directive(
                self.namespace.as_str(),
                name,
            ))
        }
    }
}

/// Stateless directive router.
///
/// The dispatcher holds only shared collaborators and may be used from any
/// number of threads at once.
pub struct Dispatcher {
    identity: Arc<dyn IdentityResolver>,
    documents: Arc<dyn DocumentStore>,
    stamper: Arc<dyn Stamper>,
    manufacturer: String,
}

impl Dispatcher {
    /// Creates a dispatcher using the identity and document collaborators.
    pub fn new(
        systems: &ExternalSystems,
        stamper: Arc<dyn Stamper>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            identity: Arc::clone(&systems.identity),
            documents: Arc::clone(&systems.documents),
            stamper,
            manufacturer: manufacturer.into(),
        }
    }

    /// Classifies and handles one directive.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] describing the first validation,
    /// collaborator, or translation failure.
    pub fn dispatch(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let header = &directive.header;
        let namespace = Namespace::parse(&header.namespace).ok_or_else(|| {
            DispatchError::unsupported_directive(&header.namespace, &header.name)
        })?;

        debug!(
            target: DISPATCH_TARGET,
            namespace = namespace.as_str(),
            name = header.name.as_str(),
            "routing directive"
        );

        match namespace {
            Namespace::Discovery => self.route(directive, &NamespaceRoutes::DISCOVERY, Self::discover),
            Namespace::Authorization => {
                self.route(directive, &NamespaceRoutes::AUTHORIZATION, Self::accept_grant)
            }
            Namespace::PowerController => self.route(directive, &NamespaceRoutes::POWER, Self::power),
            Namespace::BrightnessController => {
                self.route(directive, &NamespaceRoutes::BRIGHTNESS, Self::brightness)
            }
            Namespace::ColorController => self.route(directive, &NamespaceRoutes::COLOR, Self::color),
            Namespace::ColorTemperatureController => self.route(
                directive,
                &NamespaceRoutes::COLOR_TEMPERATURE,
                Self::color_temperature,
            ),
            Namespace::PlaybackController => {
                self.route(directive, &NamespaceRoutes::PLAYBACK, Self::playback)
            }
            other => Err(DispatchError::unreachable(format!(
                "no routing context for namespace {}",
                other.as_str()
            ))),
        }
    }

    fn route(
        &self,
        directive: &Directive,
        routes: &NamespaceRoutes,
        handler: fn(&Self, &Directive) -> Result<DispatchOutcome, DispatchError>,
    ) -> Result<DispatchOutcome, DispatchError> {
        routes.check(&directive.header.name)?;
        handler(self, directive)
    }

    fn envelopes(&self) -> EnvelopeBuilder<'_> {
        EnvelopeBuilder::new(self.stamper.as_ref())
    }

    fn discover(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let payload: DiscoverPayload = validation::optional_payload(directive)?;
        let token = validation::bearer_token(payload.scope.as_ref())?;

        let profile = self
            .identity
            .resolve(token)
            .map_err(DispatchError::identity_resolution)?;
        let user_id = profile.user_id.as_str();
        info!(target: DISPATCH_TARGET, user_id, "discovery requested");

        let bytes = self
            .documents
            .fetch(&document_key(user_id))
            .map_err(|source| DispatchError::document(user_id, source))?;
        let document: DiscoveryDocument = serde_json::from_slice(&bytes)
            .map_err(|source| DispatchError::document(user_id, source))?;
        let devices = to_device_list(&document, &self.manufacturer)?;

        debug!(
            target: DISPATCH_TARGET,
            user_id,
            devices = devices.len(),
            "discovery document translated"
        );
        Ok(DispatchOutcome::respond(
            self.envelopes().discovery_response(devices),
        ))
    }

    fn accept_grant(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let payload: AcceptGrantPayload = validation::payload(directive)?;
        info!(
            target: DISPATCH_TARGET,
            grant_type = payload.grant.grant_type.as_str(),
            "authorization grant accepted"
        );
        Ok(DispatchOutcome::respond(self.envelopes().grant_response()))
    }

    fn power(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let target = validation::control_target(directive)?;
        let (body, state) = if directive.header.name == "TurnOn" {
            (turn_on_message(target.endpoint_id), "ON")
        } else {
            (turn_off_message(target.endpoint_id), "OFF")
        };
        Ok(self.control_outcome(
            directive,
            &target,
            Some(ChangedProperty::new(
                Namespace::PowerController,
                "powerState",
                state,
            )),
            body,
        ))
    }

    fn brightness(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let target = validation::control_target(directive)?;
        let payload: BrightnessPayload = validation::payload(directive)?;
        let percent = validation::brightness_percent(payload.brightness)?;
        Ok(self.control_outcome(
            directive,
            &target,
            Some(ChangedProperty::new(
                Namespace::BrightnessController,
                "brightness",
                percent,
            )),
            brightness_message(target.endpoint_id, percent),
        ))
    }

    fn color(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let target = validation::control_target(directive)?;
        let payload: ColorPayload = validation::payload(directive)?;
        let hsv = validation::colour(payload.color)?;
        let value = json!({
            "hue": hsv.hue,
            "saturation": hsv.saturation,
            "brightness": hsv.brightness,
        });
        Ok(self.control_outcome(
            directive,
            &target,
            Some(ChangedProperty::new(Namespace::ColorController, "color", value)),
            color_message(target.endpoint_id, hsv),
        ))
    }

    fn color_temperature(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let target = validation::control_target(directive)?;
        let payload: ColorTemperaturePayload = validation::payload(directive)?;
        let kelvin = validation::kelvin(payload.color_temperature_in_kelvin)?;
        Ok(self.control_outcome(
            directive,
            &target,
            Some(ChangedProperty::new(
                Namespace::ColorTemperatureController,
                "colorTemperatureInKelvin",
                kelvin,
            )),
            color_temperature_message(target.endpoint_id, kelvin),
        ))
    }

    fn playback(&self, directive: &Directive) -> Result<DispatchOutcome, DispatchError> {
        let target = validation::control_target(directive)?;
        Ok(self.control_outcome(
            directive,
            &target,
            None,
            playback_control_message(target.endpoint_id, &directive.header.name),
        ))
    }

    fn control_outcome(
        &self,
        directive: &Directive,
        target: &ControlTarget<'_>,
        changed: Option<ChangedProperty>,
        body: String,
    ) -> DispatchOutcome {
        let response = self.envelopes().control_response(
            changed,
            Some(target.endpoint.clone()),
            directive.header.correlation_token.clone(),
        );
        DispatchOutcome::with_command(response, OutboundCommand::new(target.queue, body))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("manufacturer", &self.manufacturer)
            .finish_non_exhaustive()
    }
}
