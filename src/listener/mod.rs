//! Interception and dispatch of failures.
//!
//! A [`Listener`] is registered with a [`Host`] once per process. The host
//! feeds it raw signals, the listener normalizes them into [`Throwable`]s and
//! dispatches each one to its responder chain.
//!
//! # Signals
//!
//! - **Runtime errors** ([`Listener::on_runtime_error`]): filtered by the
//!   configured severity mode, then dispatched. The return value tells the
//!   host whether to suppress its native reporting.
//! - **Uncaught exceptions** ([`Listener::on_uncaught_exception`]):
//!   dispatched as-is.
//! - **Shutdown** ([`Listener::on_shutdown`]): the host's last error is
//!   dispatched if, and only if, it is fatal.
//!
//! # Dispatch
//!
//! Responders are invoked in registration order. Every responder is asked
//! to [`consider`] the throwable and then to [`handle`] it, whatever the
//! answer. The first failing responder ends the dispatch.
//!
//! Dispatching without responders fails with [`NoResponder`]. Converting
//! that error back into a throwable and dispatching it (as a host does when
//! the error escapes as an uncaught exception) terminates the process rather
//! than looping.
//!
//! [`Throwable`]: crate::throwable::Throwable
//! [`consider`]: crate::responder::Responder::consider
//! [`handle`]: crate::responder::Responder::handle
//! [`NoResponder`]: crate::error::NoResponder

mod config;
mod hooks;
mod host;
mod process;

pub use self::config::ListenerConfig;
pub use self::hooks::HookSet;
pub use self::host::Host;
pub use self::host::LastError;
pub use self::process::ProcessHost;
pub use self::process::ShutdownGuard;

use parking_lot::RwLock;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing::Span;
use tracing::debug;
use tracing::error;
use tracing::span;
use tracing::trace;

use crate::error::DispatchError;
use crate::error::NoResponder;
use crate::loom::sync::atomic::AtomicBool;
use crate::loom::sync::atomic::AtomicU8;
use crate::loom::sync::atomic::AtomicU32;
use crate::loom::sync::atomic::Ordering;
use crate::loom::sync::Mutex;
use crate::responder::Responder;
use crate::throwable::Severity;
use crate::throwable::Stack;
use crate::throwable::Throwable;
use crate::utils::ExitCode;
use crate::utils::measure_fn;

/// Listens for host failure signals and dispatches them to responders.
pub struct Listener {
  host: Arc<dyn Host>,
  responders: RwLock<Vec<Arc<dyn Responder>>>,
  mode: AtomicU32,
  override_native: AtomicBool,
  active: AtomicU8,
  registration: Mutex<()>,
}

impl Listener {
  /// Creates a new listener.
  ///
  /// No hook is active until [`listen`] is called.
  ///
  /// [`listen`]: Listener::listen
  pub fn new(host: Arc<dyn Host>, responders: Vec<Arc<dyn Responder>>, config: ListenerConfig) -> Self {
    Self {
      host,
      responders: RwLock::new(responders),
      mode: AtomicU32::new(config.mode.bits()),
      override_native: AtomicBool::new(config.override_native),
      active: AtomicU8::new(HookSet::empty().bits()),
      registration: Mutex::new(()),
    }
  }

  // ---------------------------------------------------------------------------
  // Activation
  // ---------------------------------------------------------------------------

  /// Registers the listener with its host for the given hooks.
  ///
  /// Hooks that are already active are left untouched. Registration is
  /// serialized: when `listen` returns, every hook in `hooks` is registered
  /// with the host, whichever call registered it.
  pub fn listen(self: &Arc<Self>, hooks: HookSet) -> &Arc<Self> {
    let span: Span = span!(target: "errwatch", Level::DEBUG, "listener::listen");
    let _registration = self.registration.lock();
    let next: HookSet = hooks.difference(self.active());

    if next.contains(HookSet::ERROR) {
      debug!(target: "errwatch", parent: &span, mode = ?self.mode(), "activating error hook");
      self.host.register_error_hook(self.mode(), Arc::clone(self));
    }

    if next.contains(HookSet::EXCEPTION) {
      debug!(target: "errwatch", parent: &span, "activating exception hook");
      self.host.register_exception_hook(Arc::clone(self));
    }

    if next.contains(HookSet::SHUTDOWN) {
      debug!(target: "errwatch", parent: &span, "activating shutdown hook");
      self.host.register_shutdown_hook(Arc::clone(self));
    }

    self.active.fetch_or(next.bits(), Ordering::AcqRel);
    self
  }

  /// Returns the hooks this listener is active for.
  #[inline]
  pub fn active(&self) -> HookSet {
    HookSet::from_bits_retain(self.active.load(Ordering::Acquire))
  }

  // ---------------------------------------------------------------------------
  // Configuration
  // ---------------------------------------------------------------------------

  /// Returns the current configuration.
  #[inline]
  pub fn config(&self) -> ListenerConfig {
    ListenerConfig {
      mode: self.mode(),
      override_native: self.override_native(),
    }
  }

  /// Returns the severities the listener reacts to.
  #[inline]
  pub fn mode(&self) -> Severity {
    Severity::from_bits_retain(self.mode.load(Ordering::Acquire))
  }

  /// Sets the severities the listener reacts to.
  ///
  /// An already active error hook keeps the mode it was registered with;
  /// filtering on the listener side always uses the current mode.
  #[inline]
  pub fn set_mode(&self, mode: Severity) -> &Self {
    self.mode.store(mode.bits(), Ordering::Release);
    self
  }

  /// Returns `true` if the host's native reporting is suppressed.
  #[inline]
  pub fn override_native(&self) -> bool {
    self.override_native.load(Ordering::Acquire)
  }

  /// Sets whether the host's native reporting is suppressed.
  #[inline]
  pub fn set_override(&self, override_native: bool) -> &Self {
    self.override_native.store(override_native, Ordering::Release);
    self
  }

  // ---------------------------------------------------------------------------
  // Responder Chain
  // ---------------------------------------------------------------------------

  /// Appends a responder to the chain.
  pub fn add_responder(&self, responder: Arc<dyn Responder>) -> &Self {
    self.responders.write().push(responder);
    self
  }

  /// Replaces the whole chain.
  pub fn replace_responders(&self, responders: Vec<Arc<dyn Responder>>) -> &Self {
    *self.responders.write() = responders;
    self
  }

  /// Returns the chain, in dispatch order.
  pub fn responders(&self) -> Vec<Arc<dyn Responder>> {
    self.responders.read().clone()
  }

  // ---------------------------------------------------------------------------
  // Host Signals
  // ---------------------------------------------------------------------------

  /// Handles a runtime error signal.
  ///
  /// Returns `true` if the host should suppress its native reporting. Errors
  /// outside the configured mode are not dispatched and return `false`.
  pub fn on_runtime_error<M, F>(
    &self,
    severity: Severity,
    message: M,
    file: F,
    line: u32,
  ) -> Result<bool, DispatchError>
  where
    M: Into<String>,
    F: Into<String>,
  {
    if !severity.intersects(self.mode()) {
      trace!(target: "errwatch", %severity, "runtime error filtered");
      return Ok(false);
    }

    let throwable: Throwable =
      Throwable::error(severity, message, file, line).with_stack(Stack::capture());

    self.dispatch(&throwable)?;

    Ok(self.override_native())
  }

  /// Handles an exception that escaped all program-level handling.
  #[inline]
  pub fn on_uncaught_exception(&self, throwable: &Throwable) -> Result<(), DispatchError> {
    self.dispatch(throwable)
  }

  /// Handles the end of the process.
  ///
  /// Dispatches the host's last error if it is within the configured mode
  /// and fatal; does nothing otherwise.
  pub fn on_shutdown(&self) -> Result<(), DispatchError> {
    let Some(last) = self.host.last_error() else {
      return Ok(());
    };

    if !last.severity.intersects(self.mode()) {
      return Ok(());
    }

    if !last.severity.is_fatal() {
      trace!(target: "errwatch", severity = %last.severity, "non-fatal last error ignored");
      return Ok(());
    }

    let throwable: Throwable = Throwable::shutdown(last.severity, last.message, last.file, last.line);

    self.dispatch(&throwable)
  }

  // ---------------------------------------------------------------------------
  // Dispatch
  // ---------------------------------------------------------------------------

  /// Dispatches `throwable` to every responder, in registration order.
  ///
  /// # Errors
  ///
  /// - [`DispatchError::NoResponder`] if the chain is empty.
  /// - [`DispatchError::Responder`] if a responder fails; responders after
  ///   it are not invoked.
  ///
  /// # Termination
  ///
  /// If `throwable` reports an earlier dispatch without responders (see
  /// [`Throwable::is_unanswered`]), it is printed to stderr and the process
  /// exits with a failure status.
  pub fn dispatch(&self, throwable: &Throwable) -> Result<(), DispatchError> {
    if throwable.is_unanswered() {
      error!(target: "errwatch", throwable = %throwable, "unanswered throwable dispatched; terminating");
      ExitCode::FAILURE.exit_with(throwable);
    }

    let span: Span = span!(
      target: "errwatch",
      Level::DEBUG,
      "listener::dispatch",
      category = %throwable.category(),
    );

    let chain: Vec<Arc<dyn Responder>> = self.responders();

    if chain.is_empty() {
      error!(target: "errwatch", parent: &span, throwable = %throwable, "no responder is registered");
      return Err(NoResponder::new(throwable).into());
    }

    let (result, elapsed): (Result<(), DispatchError>, Duration) =
      measure_fn(|| dispatch_chain(&span, &chain, throwable));

    debug!(
      target: "errwatch",
      parent: &span,
      responders = chain.len(),
      elapsed = ?elapsed,
      ok = result.is_ok(),
      "dispatched",
    );

    result
  }
}

impl Debug for Listener {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Listener")
      .field("responders", &self.responders.read().len())
      .field("mode", &self.mode())
      .field("override_native", &self.override_native())
      .field("active", &self.active())
      .finish_non_exhaustive()
  }
}

fn dispatch_chain(
  span: &Span,
  chain: &[Arc<dyn Responder>],
  throwable: &Throwable,
) -> Result<(), DispatchError> {
  for (index, responder) in chain.iter().enumerate() {
    // `consider` is advisory: `handle` runs regardless of the answer.
    let considered: bool = responder.consider(throwable);

    trace!(target: "errwatch", parent: span, index, considered, "responder");

    if let Err(source) = responder.handle(throwable) {
      error!(target: "errwatch", parent: span, index, error = %source, "responder failed");
      return Err(DispatchError::Responder { index, source });
    }
  }

  Ok(())
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
