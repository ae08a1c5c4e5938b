use parking_lot::Mutex;
use parking_lot::RwLock;
use std::io;
use std::io::Write;
use std::panic;
use std::panic::Location;
use std::panic::PanicHookInfo;
use std::sync::Arc;
use tracing::Level;
use tracing::Span;
use tracing::debug;
use tracing::error;
use tracing::span;

use crate::error::DispatchError;
use crate::listener::Host;
use crate::listener::LastError;
use crate::listener::Listener;
use crate::loom::sync::atomic::AtomicBool;
use crate::loom::sync::atomic::Ordering;
use crate::throwable::Severity;
use crate::throwable::Throwable;
use crate::utils::ExitCode;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static>;

/// [`Host`] for a Rust process.
///
/// # Hooks
///
/// - **Error**: runtime errors are raised explicitly with
///   [`ProcessHost::raise`]. Only the most recently registered listener
///   receives them. Fatal severities never reach it: they are reported
///   natively and recorded as the last error, then the shutdown hooks run
///   and the process exits with a failure status.
/// - **Exception**: panics. The panic hook installed on registration chains
///   to the previous hook unless the listener overrides native reporting.
/// - **Shutdown**: runs once, from [`ProcessHost::shutdown`] or when the
///   [`ShutdownGuard`] returned by [`ProcessHost::guard`] is dropped.
///
/// A dispatch that finds no responder is escalated as an uncaught
/// exception, which terminates the process.
///
/// # Native Reporting
///
/// Errors that no listener suppresses are written to the native sink
/// (stderr by default) as `"{severity}: {message} in {file} on line {line}"`
/// and recorded as the last error.
pub struct ProcessHost {
  error_hook: RwLock<Option<(Severity, Arc<Listener>)>>,
  shutdown_hooks: Mutex<Vec<Arc<Listener>>>,
  shutdown: AtomicBool,
  last_error: Mutex<Option<LastError>>,
  native: Mutex<Box<dyn Write + Send>>,
}

impl ProcessHost {
  /// Creates a host reporting natively to stderr.
  #[inline]
  pub fn new() -> Self {
    Self::with_native_sink(Box::new(io::stderr()))
  }

  /// Creates a host reporting natively to `sink`.
  pub fn with_native_sink(sink: Box<dyn Write + Send>) -> Self {
    Self {
      error_hook: RwLock::new(None),
      shutdown_hooks: Mutex::new(Vec::new()),
      shutdown: AtomicBool::new(false),
      last_error: Mutex::new(None),
      native: Mutex::new(sink),
    }
  }

  /// Raises a runtime error at the caller's location.
  ///
  /// A fatal severity does not return: the shutdown hooks run and the
  /// process exits with a failure status.
  ///
  /// # Errors
  ///
  /// Returns the dispatch error of the listener the error was routed to.
  /// The error is still reported natively and recorded as the last error.
  #[track_caller]
  pub fn raise<M>(&self, severity: Severity, message: M) -> Result<(), DispatchError>
  where
    M: Into<String>,
  {
    let location: &Location<'static> = Location::caller();
    let message: String = message.into();

    if severity.is_fatal() {
      self.report_native(severity, &message, location);
      self.record(severity, message, location);
      self.terminate();
    }

    let hook: Option<(Severity, Arc<Listener>)> = self.error_hook.read().clone();

    let outcome: Result<bool, DispatchError> = match hook {
      Some((mode, listener)) if severity.intersects(mode) => listener
        .on_runtime_error(severity, message.as_str(), location.file(), location.line())
        .or_else(|error| escalate(&listener, Err(error)).map(|()| false)),
      _ => Ok(false),
    };

    if !matches!(outcome, Ok(true)) {
      self.report_native(severity, &message, location);
      self.record(severity, message, location);
    }

    outcome.map(|_| ())
  }

  /// Runs the shutdown hooks.
  ///
  /// Hooks run once per host; later calls return `Ok(())` immediately, also
  /// when an earlier run panicked.
  ///
  /// # Errors
  ///
  /// Returns the first dispatch error. Remaining hooks are skipped.
  pub fn shutdown(&self) -> Result<(), DispatchError> {
    if self.shutdown.swap(true, Ordering::AcqRel) {
      return Ok(());
    }

    let span: Span = span!(target: "errwatch", Level::DEBUG, "host::shutdown");
    let hooks: Vec<Arc<Listener>> = self.shutdown_hooks.lock().clone();

    debug!(target: "errwatch", parent: &span, hooks = hooks.len(), "running shutdown hooks");

    hooks.iter().try_for_each(|listener| escalate(listener, listener.on_shutdown()))
  }

  /// Returns a guard running the shutdown hooks when dropped.
  #[inline]
  pub fn guard(self: &Arc<Self>) -> ShutdownGuard {
    ShutdownGuard {
      host: Arc::clone(self),
    }
  }

  /// Runs the shutdown hooks and exits with a failure status.
  #[cold]
  fn terminate(&self) -> ! {
    if let Err(error) = self.shutdown() {
      error!(target: "errwatch", error = %error, "shutdown hook failed");
    }

    ExitCode::FAILURE.exit_process()
  }

  fn record(&self, severity: Severity, message: String, location: &Location<'_>) {
    *self.last_error.lock() = Some(LastError {
      severity,
      message,
      file: location.file().to_owned(),
      line: location.line(),
    });
  }

  fn report_native(&self, severity: Severity, message: &str, location: &Location<'_>) {
    let mut sink: _ = self.native.lock();

    // Native reporting is best effort.
    let _ignore: io::Result<()> = writeln!(
      sink,
      "{severity}: {message} in {} on line {}",
      location.file(),
      location.line(),
    );
  }
}

impl Default for ProcessHost {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Host for ProcessHost {
  fn register_error_hook(&self, mode: Severity, listener: Arc<Listener>) {
    *self.error_hook.write() = Some((mode, listener));
  }

  fn register_exception_hook(&self, listener: Arc<Listener>) {
    let previous: PanicHook = panic::take_hook();

    panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
      let throwable: Throwable = Throwable::from_panic(info);

      if let Err(error) = escalate(&listener, listener.on_uncaught_exception(&throwable)) {
        error!(target: "errwatch", error = %error, "uncaught exception was not handled");
      }

      if !listener.override_native() {
        previous(info);
      }
    }));
  }

  fn register_shutdown_hook(&self, listener: Arc<Listener>) {
    self.shutdown_hooks.lock().push(listener);
  }

  fn last_error(&self) -> Option<LastError> {
    self.last_error.lock().clone()
  }
}

/// Re-dispatches a missing-responder failure as an uncaught exception.
///
/// The listener terminates the process on that dispatch, so this only
/// returns for other results.
fn escalate(listener: &Listener, result: Result<(), DispatchError>) -> Result<(), DispatchError> {
  match result {
    Err(DispatchError::NoResponder(error)) => listener.on_uncaught_exception(&Throwable::from(error)),
    result => result,
  }
}

// -----------------------------------------------------------------------------
// Shutdown Guard
// -----------------------------------------------------------------------------

/// Runs the shutdown hooks of a [`ProcessHost`] when dropped.
#[must_use = "shutdown hooks run when the guard is dropped"]
pub struct ShutdownGuard {
  host: Arc<ProcessHost>,
}

impl Drop for ShutdownGuard {
  fn drop(&mut self) {
    if let Err(error) = self.host.shutdown() {
      error!(target: "errwatch", error = %error, "shutdown hook failed");
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use parking_lot::Mutex;
  use std::env;
  use std::io;
  use std::io::Write;
  use std::panic;
  use std::panic::AssertUnwindSafe;
  use std::panic::Location;
  use std::process::Command;
  use std::process::Output;
  use std::sync::Arc;

  use crate::error::BoxError;
  use crate::error::DispatchError;
  use crate::listener::HookSet;
  use crate::listener::Host;
  use crate::listener::Listener;
  use crate::listener::ListenerConfig;
  use crate::listener::ProcessHost;
  use crate::render::PlaintextRenderer;
  use crate::responder::RenderResponder;
  use crate::responder::Responder;
  use crate::throwable::Category;
  use crate::throwable::Severity;
  use crate::throwable::Throwable;

  const CHILD: &str = "ERRWATCH_TEST_PROCESS_CHILD";

  #[derive(Clone, Default)]
  struct Buffer(Arc<Mutex<Vec<u8>>>);

  impl Buffer {
    fn contents(&self) -> String {
      String::from_utf8(self.0.lock().clone()).unwrap()
    }
  }

  impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[derive(Default)]
  struct Recorder {
    seen: Mutex<Vec<Category>>,
  }

  impl Responder for Recorder {
    fn consider(&self, _throwable: &Throwable) -> bool {
      true
    }

    fn handle(&self, throwable: &Throwable) -> Result<(), BoxError> {
      self.seen.lock().push(throwable.category());
      Ok(())
    }
  }

  struct Failing;

  impl Responder for Failing {
    fn consider(&self, _throwable: &Throwable) -> bool {
      true
    }

    fn handle(&self, _throwable: &Throwable) -> Result<(), BoxError> {
      Err(Box::new(io::Error::other("sink closed")))
    }
  }

  struct Panicking;

  impl Responder for Panicking {
    fn consider(&self, _throwable: &Throwable) -> bool {
      true
    }

    fn handle(&self, _throwable: &Throwable) -> Result<(), BoxError> {
      panic!("responder exploded");
    }
  }

  fn host() -> (Arc<ProcessHost>, Buffer) {
    let buffer: Buffer = Buffer::default();
    let host: Arc<ProcessHost> = Arc::new(ProcessHost::with_native_sink(Box::new(buffer.clone())));

    (host, buffer)
  }

  fn attach(host: &Arc<ProcessHost>, responders: Vec<Arc<dyn Responder>>, config: ListenerConfig) {
    let listener: Arc<Listener> = Arc::new(Listener::new(host.clone(), responders, config));

    listener.listen(HookSet::ERROR | HookSet::SHUTDOWN);
  }

  fn setup(config: ListenerConfig) -> (Arc<ProcessHost>, Arc<Recorder>, Buffer) {
    let (host, buffer) = host();
    let recorder: Arc<Recorder> = Arc::new(Recorder::default());

    attach(&host, vec![recorder.clone()], config);

    (host, recorder, buffer)
  }

  fn is_child(name: &str) -> bool {
    env::var(CHILD).is_ok_and(|value| value == name)
  }

  fn run_child(name: &str) -> (Option<i32>, String) {
    let output: Output = Command::new(env::current_exe().unwrap())
      .args(["--exact", name, "--nocapture", "--test-threads=1"])
      .env(CHILD, name)
      .output()
      .unwrap();

    (output.status.code(), String::from_utf8_lossy(&output.stderr).into_owned())
  }

  #[test]
  fn test_raise_without_override_reports_natively() {
    let (host, recorder, buffer) = setup(ListenerConfig::new());

    host.raise(Severity::USER_WARNING, "careful").unwrap();

    assert_eq!(*recorder.seen.lock(), [Category::Error(Severity::USER_WARNING)]);
    assert!(buffer.contents().starts_with("User warning: careful in "));
    assert_eq!(host.last_error().unwrap().message, "careful");
  }

  #[test]
  fn test_raise_with_override_is_silent() {
    let (host, recorder, buffer) = setup(ListenerConfig::new().with_override(true));

    host.raise(Severity::USER_WARNING, "careful").unwrap();

    assert_eq!(recorder.seen.lock().len(), 1);
    assert!(buffer.contents().is_empty());
    assert!(host.last_error().is_none());
  }

  #[test]
  fn test_raise_outside_mode() {
    let (host, recorder, buffer) = setup(ListenerConfig::new().with_mode(Severity::WARNING));

    host.raise(Severity::NOTICE, "ignored").unwrap();

    assert!(recorder.seen.lock().is_empty());
    assert!(buffer.contents().starts_with("Notice: ignored in "));
  }

  #[test]
  fn test_raise_failing_responder_still_reports() {
    let (host, buffer) = host();

    attach(&host, vec![Arc::new(Failing)], ListenerConfig::new().with_override(true));

    let error: DispatchError = host.raise(Severity::USER_WARNING, "careful").unwrap_err();

    assert!(matches!(error, DispatchError::Responder { index: 0, .. }));
    assert!(buffer.contents().starts_with("User warning: careful in "));
    assert_eq!(host.last_error().unwrap().severity, Severity::USER_WARNING);
  }

  #[test]
  fn test_raise_without_responders_terminates() {
    const NAME: &str = "listener::process::tests::test_raise_without_responders_terminates";

    if is_child(NAME) {
      let (host, _buffer) = host();

      attach(&host, Vec::new(), ListenerConfig::new());

      let _ignore: Result<(), DispatchError> = host.raise(Severity::USER_NOTICE, "nobody listens");

      panic!("raise returned after a dispatch without responders");
    }

    let (code, stderr) = run_child(NAME);

    assert_eq!(code, Some(1), "stderr: {stderr}");
    assert!(stderr.contains("nobody listens"), "stderr: {stderr}");
    assert!(!stderr.contains("raise returned"), "stderr: {stderr}");
  }

  #[test]
  fn test_raise_fatal_runs_shutdown_and_exits() {
    const NAME: &str = "listener::process::tests::test_raise_fatal_runs_shutdown_and_exits";

    if is_child(NAME) {
      let host: Arc<ProcessHost> = Arc::new(ProcessHost::new());
      let renderer: Arc<PlaintextRenderer> = Arc::new(PlaintextRenderer::default());

      attach(
        &host,
        vec![Arc::new(RenderResponder::stderr(renderer))],
        ListenerConfig::new().with_override(true),
      );

      host.raise(Severity::FATAL, "out of memory").unwrap();
      host.raise(Severity::NOTICE, "after the fatal error").unwrap();
      host.shutdown().unwrap();

      panic!("raise returned after a fatal error");
    }

    let (code, stderr) = run_child(NAME);

    assert_eq!(code, Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Fatal error: out of memory in "), "stderr: {stderr}");
    assert!(stderr.contains("Fatal error\n-----------\nout of memory\n"), "stderr: {stderr}");
    assert!(!stderr.contains("after the fatal error"), "stderr: {stderr}");
    assert!(!stderr.contains("raise returned"), "stderr: {stderr}");
  }

  #[test]
  fn test_fatal_last_error_reaches_listener_at_shutdown() {
    let (host, recorder, _buffer) = setup(ListenerConfig::new().with_override(true));

    host.record(Severity::FATAL, String::from("out of memory"), Location::caller());
    host.shutdown().unwrap();
    host.shutdown().unwrap();

    assert_eq!(*recorder.seen.lock(), [Category::Shutdown(Severity::FATAL)]);
  }

  #[test]
  fn test_guard_runs_shutdown() {
    let (host, recorder, _buffer) = setup(ListenerConfig::new());

    host.record(Severity::COMPILE_WARNING, String::from("late"), Location::caller());

    drop(host.guard());

    assert_eq!(*recorder.seen.lock(), [Category::Shutdown(Severity::COMPILE_WARNING)]);
  }

  #[test]
  fn test_non_fatal_shutdown_is_ignored() {
    let (host, recorder, _buffer) = setup(ListenerConfig::new());

    host.raise(Severity::DEPRECATED, "old").unwrap();
    host.shutdown().unwrap();

    assert_eq!(*recorder.seen.lock(), [Category::Error(Severity::DEPRECATED)]);
  }

  #[test]
  fn test_shutdown_after_panicking_responder() {
    let (host, _buffer) = host();

    attach(&host, vec![Arc::new(Panicking)], ListenerConfig::new());

    host.record(Severity::PARSE, String::from("unexpected token"), Location::caller());

    assert!(panic::catch_unwind(AssertUnwindSafe(|| host.shutdown())).is_err());
    assert!(host.shutdown().is_ok());

    drop(host.guard());
  }
}
