//! Persistent Session
//!
//! Reads commands line by line and answers each with one decimal line.

use std::io::{BufRead, ErrorKind, Write};

use crate::dispatch::Dispatcher;
use crate::error::{NativeError, Result};
use crate::protocol::ResultCode;

/// Where the session loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Reading,
    Dispatching,
    Responding,
    Terminated,
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lines read and answered
    pub commands_processed: u64,

    /// Answers equal to 255 (includes real bytes of value 255)
    pub failures: u64,
}

/// One persistent-mode conversation over a reader/writer pair
///
/// Commands are handled strictly one at a time: a line is fully dispatched
/// and its answer flushed before the next line is read.
pub struct Session<'a, R, W> {
    reader: R,
    writer: W,
    dispatcher: &'a Dispatcher,
    farewell: &'a str,
    state: SessionState,
    stats: SessionStats,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(reader: R, writer: W, dispatcher: &'a Dispatcher, farewell: &'a str) -> Self {
        Self {
            reader,
            writer,
            dispatcher,
            farewell,
            state: SessionState::Idle,
            stats: SessionStats::default(),
        }
    }

    /// Run until the input is exhausted
    ///
    /// Returns an error only for I/O failures on the streams themselves.
    /// A closed output pipe ends the session without error.
    pub fn run(mut self) -> Result<SessionStats> {
        let mut line = Vec::new();

        loop {
            self.transition(SessionState::Reading);
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            self.transition(SessionState::Dispatching);
            let code = self.dispatcher.process_command(trim_line_ending(&line));
            self.record(code);

            self.transition(SessionState::Responding);
            if let Err(e) = self.respond(code) {
                if is_broken_pipe(&e) {
                    tracing::debug!("Output closed before response could be sent: {}", e);
                    self.transition(SessionState::Terminated);
                    return Ok(self.stats);
                }
                return Err(e);
            }

            self.transition(SessionState::Idle);
        }

        self.transition(SessionState::Terminated);
        if let Err(e) = self.say_farewell() {
            if !is_broken_pipe(&e) {
                return Err(e);
            }
            tracing::debug!("Output closed before farewell: {}", e);
        }

        tracing::debug!(
            "Session ended: {} commands, {} failures",
            self.stats.commands_processed,
            self.stats.failures
        );
        Ok(self.stats)
    }

    fn transition(&mut self, next: SessionState) {
        tracing::trace!("Session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn record(&mut self, code: ResultCode) {
        self.stats.commands_processed += 1;
        if code.is_failure() {
            self.stats.failures += 1;
        }
    }

    /// Write the code as one decimal line and flush immediately
    fn respond(&mut self, code: ResultCode) -> Result<()> {
        writeln!(self.writer, "{}", code)?;
        self.writer.flush()?;
        Ok(())
    }

    fn say_farewell(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", self.farewell)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_broken_pipe(error: &NativeError) -> bool {
    matches!(error, NativeError::Io(e) if e.kind() == ErrorKind::BrokenPipe)
}
