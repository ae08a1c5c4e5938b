use tracing::Level;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::error::BoxError;
use crate::render;
use crate::responder::Responder;
use crate::throwable::Category;
use crate::throwable::Severity;
use crate::throwable::Throwable;

/// Responder that records each throwable as a `tracing` event.
///
/// Events are emitted with target `errwatch`. The level follows the
/// throwable: exceptions and errors are `ERROR`, warnings `WARN`, and
/// notices, deprecations and strict messages `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingResponder;

impl TracingResponder {
  /// Creates a new `TracingResponder`.
  #[inline]
  pub const fn new() -> Self {
    Self
  }

  /// Returns the event level used for `throwable`.
  pub fn level(throwable: &Throwable) -> Level {
    const ERRORS: Severity = Severity::FATAL_SET
      .union(Severity::USER_FATAL)
      .union(Severity::RECOVERABLE);

    const WARNINGS: Severity = Severity::WARNING.union(Severity::USER_WARNING);

    match throwable.category() {
      Category::Exception | Category::Shutdown(_) => Level::ERROR,
      Category::Error(severity) if severity.intersects(ERRORS) => Level::ERROR,
      Category::Error(severity) if severity.intersects(WARNINGS) => Level::WARN,
      Category::Error(_) => Level::INFO,
    }
  }
}

impl Responder for TracingResponder {
  fn consider(&self, _throwable: &Throwable) -> bool {
    true
  }

  fn handle(&self, throwable: &Throwable) -> Result<(), BoxError> {
    let kind: &str = &render::display_type(throwable, true)?;

    let level: Level = Self::level(throwable);

    if level == Level::ERROR {
      error!(
        target: "errwatch",
        kind,
        category = %throwable.category(),
        code = throwable.code(),
        file = throwable.file(),
        line = throwable.line(),
        frames = throwable.stack().len(),
        "{}",
        throwable.message(),
      );
    } else if level == Level::WARN {
      warn!(
        target: "errwatch",
        kind,
        category = %throwable.category(),
        code = throwable.code(),
        file = throwable.file(),
        line = throwable.line(),
        "{}",
        throwable.message(),
      );
    } else {
      info!(
        target: "errwatch",
        kind,
        category = %throwable.category(),
        file = throwable.file(),
        line = throwable.line(),
        "{}",
        throwable.message(),
      );
    }

    Ok(())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
