use std::sync::Arc;

use crate::listener::Listener;
use crate::throwable::Severity;

/// The most recent error recorded by a host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LastError {
  pub severity: Severity,
  pub message: String,
  pub file: String,
  pub line: u32,
}

/// Hook registration surface of the host runtime.
///
/// [`Listener::listen`] is the only caller of the `register_*` methods and
/// calls each at most once per listener.
pub trait Host: Send + Sync {
  /// Routes runtime errors matching `mode` to [`Listener::on_runtime_error`].
  fn register_error_hook(&self, mode: Severity, listener: Arc<Listener>);

  /// Routes uncaught exceptions to [`Listener::on_uncaught_exception`].
  fn register_exception_hook(&self, listener: Arc<Listener>);

  /// Calls [`Listener::on_shutdown`] once when the process ends.
  fn register_shutdown_hook(&self, listener: Arc<Listener>);

  /// Returns the last error recorded by the host, if any.
  fn last_error(&self) -> Option<LastError>;
}
