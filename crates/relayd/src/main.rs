use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use relay_config::ConfigError;
use relayd::{BootstrapError, StructuredHealthReporter, bootstrap};

fn main() -> ExitCode {
    let relay = match bootstrap(Arc::new(StructuredHealthReporter::new())) {
        Ok(relay) => relay,
        Err(BootstrapError::Configuration {
            source: ConfigError::Cli(error),
        }) => error.exit(),
        Err(error) => return report(&mut io::stderr().lock(), &error),
    };

    let stdin = io::stdin();
    match relay.serve(stdin.lock(), io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report(&mut io::stderr().lock(), &error),
    }
}

fn report<W: Write>(stderr: &mut W, error: &dyn std::error::Error) -> ExitCode {
    if let Err(write_error) = writeln!(stderr, "relayd: {error}") {
        tracing::error!(%write_error, %error, "failed to report error on stderr");
    }
    ExitCode::FAILURE
}
