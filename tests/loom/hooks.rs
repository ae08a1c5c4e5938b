#![cfg(loom)]

use errwatch::error::BoxError;
use errwatch::listener::HookSet;
use errwatch::listener::Host;
use errwatch::listener::LastError;
use errwatch::listener::Listener;
use errwatch::listener::ListenerConfig;
use errwatch::responder::Responder;
use errwatch::throwable::Severity;
use errwatch::throwable::Throwable;
use loom::sync::atomic::AtomicUsize;
use loom::sync::atomic::Ordering;
use loom::thread;
use std::sync::Arc;

#[derive(Default)]
struct CountingHost {
  error: AtomicUsize,
  exception: AtomicUsize,
  shutdown: AtomicUsize,
}

impl Host for CountingHost {
  fn register_error_hook(&self, _mode: Severity, _listener: Arc<Listener>) {
    self.error.fetch_add(1, Ordering::Relaxed);
  }

  fn register_exception_hook(&self, _listener: Arc<Listener>) {
    self.exception.fetch_add(1, Ordering::Relaxed);
  }

  fn register_shutdown_hook(&self, _listener: Arc<Listener>) {
    self.shutdown.fetch_add(1, Ordering::Relaxed);
  }

  fn last_error(&self) -> Option<LastError> {
    None
  }
}

impl CountingHost {
  fn registered(&self, hooks: HookSet) -> bool {
    (!hooks.contains(HookSet::ERROR) || self.error.load(Ordering::Relaxed) == 1)
      && (!hooks.contains(HookSet::EXCEPTION) || self.exception.load(Ordering::Relaxed) == 1)
      && (!hooks.contains(HookSet::SHUTDOWN) || self.shutdown.load(Ordering::Relaxed) == 1)
  }
}

struct Noop;

impl Responder for Noop {
  fn consider(&self, _throwable: &Throwable) -> bool {
    true
  }

  fn handle(&self, _throwable: &Throwable) -> Result<(), BoxError> {
    Ok(())
  }
}

#[test]
fn concurrent_listen_registers_each_hook_once() {
  loom::model(|| {
    let host: Arc<CountingHost> = Arc::new(CountingHost::default());
    let listener: Arc<Listener> = Arc::new(Listener::new(host.clone(), Vec::new(), ListenerConfig::new()));

    let threads: Vec<_> = [HookSet::ERROR | HookSet::EXCEPTION, HookSet::EXCEPTION | HookSet::SHUTDOWN]
      .into_iter()
      .map(|hooks| {
        let host: Arc<CountingHost> = Arc::clone(&host);
        let listener: Arc<Listener> = Arc::clone(&listener);

        thread::spawn(move || {
          listener.listen(hooks);

          // Every requested hook is registered once `listen` returns,
          // including hooks claimed by the other thread.
          assert!(host.registered(hooks));
          assert!(listener.active().contains(hooks));
        })
      })
      .collect();

    for handle in threads {
      handle.join().unwrap();
    }

    assert_eq!(host.error.load(Ordering::Relaxed), 1);
    assert_eq!(host.exception.load(Ordering::Relaxed), 1);
    assert_eq!(host.shutdown.load(Ordering::Relaxed), 1);
    assert_eq!(listener.active(), HookSet::ALL);
  });
}

#[test]
fn concurrent_override_is_observed() {
  loom::model(|| {
    let host: Arc<CountingHost> = Arc::new(CountingHost::default());
    let listener: Arc<Listener> = Arc::new(Listener::new(host, vec![Arc::new(Noop)], ListenerConfig::new()));

    let reader = {
      let listener: Arc<Listener> = Arc::clone(&listener);

      thread::spawn(move || {
        let suppressed: bool = listener.on_runtime_error(Severity::WARNING, "w", "a.rs", 1).unwrap();

        // Once the new flag is observed it is never lost.
        assert!(!suppressed || listener.override_native());
      })
    };

    let writer = {
      let listener: Arc<Listener> = Arc::clone(&listener);

      thread::spawn(move || {
        listener.set_override(true);
      })
    };

    reader.join().unwrap();
    writer.join().unwrap();

    assert!(listener.override_native());
  });
}
