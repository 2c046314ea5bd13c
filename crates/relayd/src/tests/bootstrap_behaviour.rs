//! Behavioural tests for relay bootstrap and lifecycle reporting.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};

use relay_config::{Config, ConfigError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::bootstrap::{BootstrapError, ConfigLoader, Relay, StaticConfigLoader, bootstrap_with};
use crate::external::{ExternalError, ExternalSystems};
use crate::health::HealthReporter;
use crate::host::{HostError, HostSummary};
use crate::tests::support::{
    FixedStamper, LIGHT_DOCUMENT, RecordingQueue, resolving_identity, serving_documents,
};

/// Loader that replays command-line arguments through the real parser.
struct ArgumentLoader {
    args: Vec<&'static str>,
}

impl ConfigLoader for ArgumentLoader {
    fn load(&self) -> Result<Config, ConfigError> {
        Config::load_from_iter(self.args.iter().copied())
    }
}

#[derive(Default)]
struct RecordingHealthReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingHealthReporter {
    fn record(&self, event: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(event.to_owned());
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().expect("events lock").clone()
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record("bootstrap_starting");
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record("bootstrap_succeeded");
    }

    fn bootstrap_failed(&self, _error: &BootstrapError) {
        self.record("bootstrap_failed");
    }

    fn host_stopped(&self, _summary: &HostSummary) {
        self.record("host_stopped");
    }

    fn host_failed(&self, _error: &HostError) {
        self.record("host_failed");
    }
}

#[derive(Clone, Copy, Default)]
enum Setup {
    #[default]
    Valid,
    InvalidLogFormat,
    BrokenCollaborators,
}

#[derive(Default)]
struct BootstrapWorld {
    setup: Setup,
    reporter: Arc<RecordingHealthReporter>,
    result: Option<Result<Relay, BootstrapError>>,
    summary: Option<HostSummary>,
    output: Vec<u8>,
}

impl BootstrapWorld {
    fn bootstrap(&mut self) {
        let loader: Box<dyn ConfigLoader> = match self.setup {
            Setup::InvalidLogFormat => Box::new(ArgumentLoader {
                args: vec!["relayd", "--log-format", "xml"],
            }),
            Setup::Valid | Setup::BrokenCollaborators => {
                Box::new(StaticConfigLoader::new(Config::default()))
            }
        };
        let broken = matches!(self.setup, Setup::BrokenCollaborators);
        let reporter: Arc<dyn HealthReporter> = self.reporter.clone();

        self.result = Some(bootstrap_with(
            loader.as_ref(),
            reporter,
            Arc::new(FixedStamper),
            |_config| {
                if broken {
                    return Err(ExternalError::InvalidAddress {
                        address: "not a url".to_owned(),
                        source: url::ParseError::RelativeUrlWithoutBase,
                    });
                }
                Ok(ExternalSystems::new(
                    Arc::new(resolving_identity()),
                    Arc::new(serving_documents(LIGHT_DOCUMENT)),
                    Arc::new(RecordingQueue::default()),
                ))
            },
        ));
    }

    fn relay(&self) -> &Relay {
        match self.result.as_ref() {
            Some(Ok(relay)) => relay,
            Some(Err(error)) => panic!("bootstrap failed: {error}"),
            None => panic!("bootstrap has not run"),
        }
    }
}

#[fixture]
fn world() -> RefCell<BootstrapWorld> {
    RefCell::new(BootstrapWorld::default())
}

#[given("a relay bootstrap with a valid configuration")]
fn given_valid(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().setup = Setup::Valid;
}

#[given("a relay bootstrap with an invalid log format")]
fn given_invalid_log_format(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().setup = Setup::InvalidLogFormat;
}

#[given("a relay bootstrap whose collaborators cannot be built")]
fn given_broken_collaborators(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().setup = Setup::BrokenCollaborators;
}

#[when("the relay bootstraps")]
fn when_bootstraps(world: &RefCell<BootstrapWorld>) {
    world.borrow_mut().bootstrap();
}

#[when("the relay serves a warmup probe")]
fn when_serves_warmup(world: &RefCell<BootstrapWorld>) {
    let mut world = world.borrow_mut();
    let mut output = Vec::new();
    let summary = world
        .relay()
        .serve(b"{\"warmup\":true}\n".as_slice(), &mut output)
        .expect("serve warmup");
    world.summary = Some(summary);
    world.output = output;
}

#[then("bootstrap succeeds")]
fn then_succeeds(world: &RefCell<BootstrapWorld>) {
    let world = world.borrow();
    assert_eq!(world.relay().config(), &Config::default());
}

#[then(r#"bootstrap fails with "{fragment}""#)]
fn then_fails_with(world: &RefCell<BootstrapWorld>, fragment: String) {
    let world = world.borrow();
    let fragment = strip_quotes(&fragment);
    match world.result.as_ref() {
        Some(Err(error)) => {
            let message = error.to_string();
            assert!(
                message.contains(fragment),
                "expected {fragment:?} in {message:?}"
            );
        }
        Some(Ok(_)) => panic!("bootstrap unexpectedly succeeded"),
        None => panic!("bootstrap has not run"),
    }
}

#[then(r#"the health reporter saw "{event}""#)]
fn then_reporter_saw(world: &RefCell<BootstrapWorld>, event: String) {
    let events = world.borrow().reporter.events();
    let event = strip_quotes(&event);
    assert_eq!(events.first().map(String::as_str), Some("bootstrap_starting"));
    assert!(
        events.iter().any(|seen| seen == event),
        "expected {event:?} in {events:?}"
    );
}

#[then("the relay answered {count} message")]
fn then_answered(world: &RefCell<BootstrapWorld>, count: usize) {
    let world = world.borrow();
    let summary = world.summary.expect("relay served input");
    assert_eq!(summary.responses, count);
    assert_eq!(summary.failures, 0);
    assert_eq!(world.output.as_slice(), b"{\"kind\":\"response\",\"body\":\"ok\"}\n");
}

/// Strips surrounding double quotes from a string if present.
fn strip_quotes(s: &str) -> &str {
    s.trim_matches('"')
}

#[scenario(path = "tests/features/relay_bootstrap.feature")]
fn relay_bootstrap(#[from(world)] world: RefCell<BootstrapWorld>) {
    drop(world);
}
