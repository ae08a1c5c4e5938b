use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

use crate::throwable::Severity;

/// Classification of an intercepted failure.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Category {
  /// A runtime error signal raised by the host.
  Error(Severity),
  /// An exception (panic or error value) that escaped program handling.
  Exception,
  /// A fatal error observed when the process ended.
  Shutdown(Severity),
}

impl Category {
  /// Returns the severity tag, if this category carries one.
  #[inline]
  pub const fn severity(&self) -> Option<Severity> {
    match self {
      Self::Error(severity) | Self::Shutdown(severity) => Some(*severity),
      Self::Exception => None,
    }
  }

  /// Returns the qualified type name used for throwables of this category.
  ///
  /// Exceptions carry the name of their source type instead.
  #[inline]
  pub(crate) const fn type_name(&self) -> &'static str {
    match self {
      Self::Error(_) => "errwatch::throwable::RuntimeError",
      Self::Exception => "errwatch::throwable::Exception",
      Self::Shutdown(_) => "errwatch::throwable::ShutdownError",
    }
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Self::Error(_) => f.write_str("runtime-error"),
      Self::Exception => f.write_str("exception"),
      Self::Shutdown(_) => f.write_str("fatal-shutdown-error"),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use crate::throwable::Category;
  use crate::throwable::Severity;

  #[test]
  fn test_severity() {
    assert_eq!(Category::Error(Severity::NOTICE).severity(), Some(Severity::NOTICE));
    assert_eq!(Category::Shutdown(Severity::PARSE).severity(), Some(Severity::PARSE));
    assert_eq!(Category::Exception.severity(), None);
  }

  #[test]
  fn test_display() {
    assert_eq!(format!("{}", Category::Error(Severity::NOTICE)), "runtime-error");
    assert_eq!(format!("{}", Category::Exception), "exception");
    assert_eq!(format!("{}", Category::Shutdown(Severity::FATAL)), "fatal-shutdown-error");
  }
}
