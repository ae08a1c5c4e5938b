use thiserror::Error;

use crate::error::BoxError;
use crate::throwable::Throwable;

// -----------------------------------------------------------------------------
// No Responder
// -----------------------------------------------------------------------------

/// A throwable was dispatched to a listener without responders.
///
/// Carries the message and code of the throwable that went unanswered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct NoResponder {
  message: String,
  code: i64,
}

impl NoResponder {
  /// Creates a new `NoResponder` for the given throwable.
  #[inline]
  pub fn new(throwable: &Throwable) -> Self {
    Self {
      message: throwable.message().to_owned(),
      code: throwable.code(),
    }
  }

  /// Returns the message of the unanswered throwable.
  #[inline]
  pub fn message(&self) -> &str {
    self.message.as_str()
  }

  /// Returns the code of the unanswered throwable.
  #[inline]
  pub const fn code(&self) -> i64 {
    self.code
  }
}

// -----------------------------------------------------------------------------
// Dispatch Error
// -----------------------------------------------------------------------------

/// Error returned from [`Listener::dispatch`].
///
/// [`Listener::dispatch`]: crate::listener::Listener::dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
  /// No responder is registered.
  #[error("no responder is registered: {0}")]
  NoResponder(#[from] NoResponder),
  /// A responder failed; responders after `index` were not invoked.
  #[error("responder #{index} failed to handle the throwable")]
  Responder {
    index: usize,
    #[source]
    source: BoxError,
  },
}

impl DispatchError {
  /// Returns `true` if no responder was registered.
  #[inline]
  pub fn is_no_responder(&self) -> bool {
    matches!(self, Self::NoResponder(_))
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
