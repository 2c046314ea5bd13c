//! Test suites for the relay.

mod bootstrap_behaviour;
pub(crate) mod support;
