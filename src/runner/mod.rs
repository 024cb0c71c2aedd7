//! Runner Module
//!
//! Drives the two run modes.
//!
//! ## Modes
//! - **Single invocation**: process arguments are joined with single spaces
//!   into one command; its code becomes the exit status.
//! - **Persistent**: commands are read line by line until end of input,
//!   each answered with one flushed decimal line, then a farewell line.
//!
//! ## Persistent Loop
//! ```text
//! Idle → Reading → Dispatching → Responding → Idle
//!           │
//!           └── end of input ──→ Terminated
//! ```

mod session;

pub use session::{Session, SessionState, SessionStats};

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::protocol::ResultCode;

/// Entry point for both run modes
pub struct Runner {
    config: Config,
    dispatcher: Dispatcher,
}

impl Runner {
    /// Create a runner with the built-in commands registered
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::with_defaults(config.clone());
        Self { config, dispatcher }
    }

    /// Create a runner around a custom dispatcher
    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Single-invocation mode: join `args` with spaces and process once
    pub fn run_once<I, S>(&self, args: I) -> ResultCode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Vec::new();
        for (i, arg) in args.into_iter().enumerate() {
            if i > 0 {
                command.push(b' ');
            }
            command.extend_from_slice(&os_bytes(arg.as_ref()));
        }

        tracing::debug!("Single invocation: {:?}", String::from_utf8_lossy(&command));
        self.dispatcher.process_command(&command)
    }

    /// Persistent mode: answer every line of `reader` on `writer`
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<SessionStats> {
        Session::new(reader, writer, &self.dispatcher, &self.config.farewell).run()
    }
}

/// Raw bytes of an argument; lossy only where the platform has no byte view
#[cfg(unix)]
fn os_bytes(arg: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(arg.as_bytes())
}

#[cfg(not(unix))]
fn os_bytes(arg: &OsStr) -> Cow<'_, [u8]> {
    match arg.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}
