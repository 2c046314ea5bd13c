//! Directive validation performed before any side effect.

use relay_types::{BEARER_TOKEN, Directive, Endpoint, Hsv, Scope};
use serde::de::DeserializeOwned;

use super::errors::DispatchError;
use crate::discovery::QUEUE_COOKIE;

/// Routing data extracted from a validated control directive.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ControlTarget<'a> {
    pub(crate) endpoint: &'a Endpoint,
    pub(crate) endpoint_id: &'a str,
    pub(crate) queue: &'a str,
}

/// Checks endpoint, token, and queue cookie, in that order.
pub(crate) fn control_target(directive: &Directive) -> Result<ControlTarget<'_>, DispatchError> {
    let endpoint = directive
        .endpoint
        .as_ref()
        .ok_or_else(|| DispatchError::missing_endpoint("directive has no endpoint"))?;
    let endpoint_id = endpoint
        .endpoint_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DispatchError::missing_endpoint("endpoint has no endpointId"))?;
    bearer_token(endpoint.scope.as_ref())?;
    let queue = endpoint
        .cookie_value(QUEUE_COOKIE)
        .filter(|queue| !queue.trim().is_empty())
        .ok_or_else(|| DispatchError::validation("endpoint cookie has no queue"))?;

    Ok(ControlTarget {
        endpoint,
        endpoint_id,
        queue,
    })
}

/// Returns the token of a `BearerToken` scope.
pub(crate) fn bearer_token(scope: Option<&Scope>) -> Result<&str, DispatchError> {
    let scope = scope.ok_or_else(|| DispatchError::invalid_token("scope is missing"))?;
    match scope.scope_type.as_deref() {
        Some(BEARER_TOKEN) => {}
        Some(other) => {
            return Err(DispatchError::invalid_token(format!(
                "unsupported scope type '{other}'"
            )));
        }
        None => return Err(DispatchError::invalid_token("scope type is missing")),
    }
    scope
        .token
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| DispatchError::invalid_token("bearer token is empty"))
}

/// Decodes the directive payload into `T`.
pub(crate) fn payload<T: DeserializeOwned>(directive: &Directive) -> Result<T, DispatchError> {
    serde_json::from_value(directive.payload.clone()).map_err(|error| {
        DispatchError::validation(format!(
            "invalid {} payload: {error}",
            directive.header.name
        ))
    })
}

/// Decodes the directive payload into `T`, treating an absent payload as
/// `T::default()`.
pub(crate) fn optional_payload<T: DeserializeOwned + Default>(
    directive: &Directive,
) -> Result<T, DispatchError> {
    if directive.payload.is_null() {
        return Ok(T::default());
    }
    payload(directive)
}

/// Accepts brightness percentages in `0..=100`.
pub(crate) fn brightness_percent(value: i64) -> Result<u8, DispatchError> {
    u8::try_from(value)
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or_else(|| {
            DispatchError::validation(format!("brightness {value} is outside 0..=100"))
        })
}

/// Accepts finite HSV values with hue in degrees and fractional channels.
pub(crate) fn colour(hsv: Hsv) -> Result<Hsv, DispatchError> {
    let Hsv {
        hue,
        saturation,
        brightness,
    } = hsv;
    if !(hue.is_finite() && saturation.is_finite() && brightness.is_finite()) {
        return Err(DispatchError::validation("colour components must be finite"));
    }
    if !(0.0..=360.0).contains(&hue) {
        return Err(DispatchError::validation(format!(
            "hue {hue} is outside 0..=360"
        )));
    }
    if !(0.0..=1.0).contains(&saturation) {
        return Err(DispatchError::validation(format!(
            "saturation {saturation} is outside 0..=1"
        )));
    }
    if !(0.0..=1.0).contains(&brightness) {
        return Err(DispatchError::validation(format!(
            "brightness {brightness} is outside 0..=1"
        )));
    }
    Ok(hsv)
}

/// Accepts strictly positive colour temperatures.
pub(crate) fn kelvin(value: i64) -> Result<u32, DispatchError> {
    u32::try_from(value)
        .ok()
        .filter(|kelvin| *kelvin > 0)
        .ok_or_else(|| {
            DispatchError::validation(format!("colour temperature {value}K is not positive"))
        })
}
