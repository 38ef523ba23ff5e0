//! Adapter initialisation state machine
//!
//! `Uninitialized -> Initializing -> Ready`, with `Failed` as the terminal
//! state when initialisation does not complete. Initialisation runs once;
//! an adapter never becomes partially usable.

use crate::adapters::errors::{ExchangeError, ExchangeResult};

#[derive(Debug)]
pub enum AdapterState<S> {
    Uninitialized,
    Initializing,
    Ready(S),
    Failed(String),
}

impl<S> Default for AdapterState<S> {
    fn default() -> Self {
        AdapterState::Uninitialized
    }
}

impl<S> AdapterState<S> {
    /// Run `init` exactly once, moving to `Ready` or `Failed`.
    ///
    /// Calling this a second time, whatever the outcome of the first, is a
    /// configuration error.
    pub fn initialize<F>(&mut self, init: F) -> ExchangeResult<()>
    where
        F: FnOnce() -> ExchangeResult<S>,
    {
        if !matches!(self, AdapterState::Uninitialized) {
            return Err(ExchangeError::Configuration(format!(
                "Adapter initialisation already attempted (state: {})",
                self.name()
            )));
        }

        *self = AdapterState::Initializing;
        match init() {
            Ok(session) => {
                *self = AdapterState::Ready(session);
                Ok(())
            }
            Err(e) => {
                *self = AdapterState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Borrow the ready session, or fail with `Configuration`.
    pub fn ready(&self) -> ExchangeResult<&S> {
        match self {
            AdapterState::Ready(session) => Ok(session),
            AdapterState::Failed(reason) => Err(ExchangeError::Configuration(format!(
                "Adapter failed to initialise: {}",
                reason
            ))),
            other => Err(ExchangeError::Configuration(format!(
                "Adapter is not ready (state: {})",
                other.name()
            ))),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AdapterState::Ready(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdapterState::Uninitialized => "Uninitialized",
            AdapterState::Initializing => "Initializing",
            AdapterState::Ready(_) => "Ready",
            AdapterState::Failed(_) => "Failed",
        }
    }
}
