//! Dispatcher
//!
//! Keyword registry mapping command prefixes to handlers.

use crate::config::Config;
use crate::error::{NativeError, Result};
use crate::protocol::{ResultCode, KEYWORD_SEPARATOR};

use super::{CommandHandler, TableLookupHandler};

/// Routes command lines to registered handlers
#[derive(Default)]
pub struct Dispatcher {
    /// Handlers in registration order; the first match wins
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Dispatcher {
    /// Create a dispatcher with no commands
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with every built-in command registered
    pub fn with_defaults(config: Config) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Box::new(TableLookupHandler::new(config)));
        dispatcher
    }

    /// Add a handler
    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        tracing::debug!("Registered command {:?}", handler.keyword());
        self.handlers.push(handler);
    }

    /// Registered keywords, in match order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.keyword())
    }

    /// Route `line` and return the handler's byte or the failure cause
    ///
    /// Lines are raw bytes so file paths reach the handler unchanged.
    pub fn dispatch(&self, line: impl AsRef<[u8]>) -> Result<u8> {
        let line = line.as_ref();
        for handler in &self.handlers {
            if let Some(params) = strip_keyword(line, handler.keyword()) {
                tracing::trace!(
                    "Dispatching to {:?}: {:?}",
                    handler.keyword(),
                    String::from_utf8_lossy(params)
                );
                return handler.handle(params);
            }
        }
        Err(NativeError::UnknownCommand(
            String::from_utf8_lossy(line).into_owned(),
        ))
    }

    /// Route `line` and collapse any failure to 255
    pub fn process_command(&self, line: impl AsRef<[u8]>) -> ResultCode {
        match self.dispatch(line) {
            Ok(byte) => ResultCode::from_byte(byte),
            Err(e) => {
                tracing::debug!("Command failed: {}", e);
                ResultCode::FAILURE
            }
        }
    }
}

/// Return the tail after `keyword` and one separator, if `line` starts with both
fn strip_keyword<'a>(line: &'a [u8], keyword: &str) -> Option<&'a [u8]> {
    line.strip_prefix(keyword.as_bytes())?
        .strip_prefix(&[KEYWORD_SEPARATOR])
}
