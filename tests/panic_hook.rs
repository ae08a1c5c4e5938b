use errwatch::error::BoxError;
use errwatch::listener::HookSet;
use errwatch::listener::Listener;
use errwatch::listener::ListenerConfig;
use errwatch::listener::ProcessHost;
use errwatch::responder::Responder;
use errwatch::throwable::Category;
use errwatch::throwable::Throwable;
use parking_lot::Mutex;
use std::io;
use std::panic;
use std::sync::Arc;

#[derive(Default)]
struct Recorder {
  seen: Mutex<Vec<Throwable>>,
}

impl Responder for Recorder {
  fn consider(&self, _throwable: &Throwable) -> bool {
    true
  }

  fn handle(&self, throwable: &Throwable) -> Result<(), BoxError> {
    self.seen.lock().push(throwable.clone());
    Ok(())
  }
}

// The panic hook is process-wide, so this binary holds a single test.
#[test]
fn panics_are_dispatched_as_uncaught_exceptions() {
  let host: Arc<ProcessHost> = Arc::new(ProcessHost::with_native_sink(Box::new(io::sink())));
  let recorder: Arc<Recorder> = Arc::new(Recorder::default());
  let config: ListenerConfig = ListenerConfig::new().with_override(true);
  let listener: Arc<Listener> = Arc::new(Listener::new(host, vec![recorder.clone()], config));

  listener.listen(HookSet::EXCEPTION);
  listener.listen(HookSet::EXCEPTION);

  let line: u32 = line!() + 1;
  let result: Result<(), _> = panic::catch_unwind(|| panic!("kaboom {}", 7));

  assert!(result.is_err());

  let seen: Vec<Throwable> = recorder.seen.lock().clone();

  assert_eq!(seen.len(), 1);
  assert_eq!(seen[0].category(), Category::Exception);
  assert_eq!(seen[0].message(), "kaboom 7");
  assert_eq!(seen[0].type_name(), "core::panic::Panic");
  assert!(seen[0].file().ends_with("panic_hook.rs"));
  assert_eq!(seen[0].line(), line);
}
