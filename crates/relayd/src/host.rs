//! Line-oriented host loop.
//!
//! The host reads one inbound message per line and writes exactly one JSONL
//! line per message:
//!
//! ```json
//! {"kind":"response","body":"ok"}
//! {"kind":"failure","message":"unsupported directive: namespace 'Alexa.PlaybackController', name 'Discover'"}
//! ```
//!
//! Blank lines are skipped. At end of input the loop waits for outstanding
//! deliveries before returning.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::dispatch::DispatchError;
use crate::invocation::{Delivery, INVOCATION_TARGET, Invocation, Reply};

/// Messages written to the host output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostMessage<'a> {
    /// Successful reply.
    Response {
        /// Reply body returned to the platform.
        body: &'a Reply,
    },
    /// Handling failed; only the rendered error is exposed.
    Failure {
        /// Human-readable error.
        message: String,
    },
}

/// Errors raised by the host loop itself.
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading input or writing output failed.
    #[error("host IO error: {0}")]
    Io(#[from] io::Error),
    /// A reply could not be serialised.
    #[error("failed to serialise reply: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Counters reported when the loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostSummary {
    /// Messages answered with a response.
    pub responses: usize,
    /// Messages answered with a failure.
    pub failures: usize,
}

/// Writer that frames host messages as JSONL.
pub struct HostWriter<W> {
    writer: W,
}

impl<W: Write> HostWriter<W> {
    /// Wraps an output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one message and flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or writing fails.
    pub fn write_message(&mut self, message: &HostMessage<'_>) -> Result<(), HostError> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes a successful reply.
    ///
    /// # Errors
    ///
    /// See [`HostWriter::write_message`].
    pub fn write_reply(&mut self, reply: &Reply) -> Result<(), HostError> {
        self.write_message(&HostMessage::Response { body: reply })
    }

    /// Writes a failure carrying the error's display text.
    ///
    /// # Errors
    ///
    /// See [`HostWriter::write_message`].
    pub fn write_failure(&mut self, error: &DispatchError) -> Result<(), HostError> {
        self.write_message(&HostMessage::Failure {
            message: error.to_string(),
        })
    }
}

/// Runs the host loop until `input` is exhausted.
///
/// # Errors
///
/// Returns [`HostError`] when reading or writing fails. Dispatch failures are
/// written as failure messages and do not stop the loop.
pub fn run<R, W>(invocation: &Invocation, mut input: R, output: W) -> Result<HostSummary, HostError>
where
    R: BufRead,
    W: Write,
{
    let mut writer = HostWriter::new(output);
    let mut summary = HostSummary::default();
    let mut deliveries: Vec<Delivery> = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match invocation.handle_line(&line) {
            Ok(handled) => {
                writer.write_reply(&handled.reply)?;
                summary.responses += 1;
                if handled.delivery.is_started() {
                    deliveries.push(handled.delivery);
                }
            }
            Err(error) => {
                writer.write_failure(&error)?;
                summary.failures += 1;
            }
        }
        reap_finished(&mut deliveries);
    }

    debug!(
        target: INVOCATION_TARGET,
        pending = deliveries.len(),
        "input closed; waiting for deliveries"
    );
    deliveries.into_iter().for_each(Delivery::join);
    Ok(summary)
}

fn reap_finished(deliveries: &mut Vec<Delivery>) {
    let (finished, pending): (Vec<_>, Vec<_>) = std::mem::take(deliveries)
        .into_iter()
        .partition(Delivery::is_finished);
    finished.into_iter().for_each(Delivery::join);
    *deliveries = pending;
}
