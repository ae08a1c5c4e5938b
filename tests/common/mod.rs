#![allow(dead_code)]

use errwatch::error::BoxError;
use errwatch::listener::Host;
use errwatch::listener::LastError;
use errwatch::listener::Listener;
use errwatch::responder::Responder;
use errwatch::throwable::Severity;
use errwatch::throwable::Throwable;
use parking_lot::Mutex;
use std::sync::Arc;

// -----------------------------------------------------------------------------
// Host
// -----------------------------------------------------------------------------

/// Host that records nothing but a settable last error.
#[derive(Default)]
pub struct StubHost {
  last: Mutex<Option<LastError>>,
}

impl StubHost {
  pub fn set_last(&self, severity: Severity, message: &str) {
    *self.last.lock() = Some(LastError {
      severity,
      message: message.to_owned(),
      file: String::from("main.rs"),
      line: 1,
    });
  }
}

impl Host for StubHost {
  fn register_error_hook(&self, _mode: Severity, _listener: Arc<Listener>) {}

  fn register_exception_hook(&self, _listener: Arc<Listener>) {}

  fn register_shutdown_hook(&self, _listener: Arc<Listener>) {}

  fn last_error(&self) -> Option<LastError> {
    self.last.lock().clone()
  }
}

// -----------------------------------------------------------------------------
// Responder
// -----------------------------------------------------------------------------

/// A call observed by a [`Journal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
  Consider(usize),
  Handle(usize, String),
}

/// Shared, ordered log of responder calls.
#[derive(Clone, Default)]
pub struct Journal {
  calls: Arc<Mutex<Vec<Call>>>,
}

impl Journal {
  pub fn responder(&self, id: usize) -> Arc<dyn Responder> {
    Arc::new(JournalResponder {
      id,
      journal: self.clone(),
    })
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().clone()
  }
}

struct JournalResponder {
  id: usize,
  journal: Journal,
}

impl Responder for JournalResponder {
  fn consider(&self, _throwable: &Throwable) -> bool {
    self.journal.calls.lock().push(Call::Consider(self.id));
    self.id % 2 == 0
  }

  fn handle(&self, throwable: &Throwable) -> Result<(), BoxError> {
    let message: String = throwable.message().to_owned();
    self.journal.calls.lock().push(Call::Handle(self.id, message));
    Ok(())
  }
}
