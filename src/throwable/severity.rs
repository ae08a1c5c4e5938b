use bitflags::bitflags;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

bitflags! {
  /// Severity tag of a runtime error.
  ///
  /// Each flag is a single bit so a set of severities can be used as a
  /// filter mask (see [`ListenerConfig::mode`]).
  ///
  /// [`ListenerConfig::mode`]: crate::listener::ListenerConfig::mode
  #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
  pub struct Severity: u32 {
    const FATAL = 1 << 0;
    const WARNING = 1 << 1;
    const PARSE = 1 << 2;
    const NOTICE = 1 << 3;
    const CORE_FATAL = 1 << 4;
    const CORE_WARNING = 1 << 5;
    const COMPILE_FATAL = 1 << 6;
    const COMPILE_WARNING = 1 << 7;
    const USER_FATAL = 1 << 8;
    const USER_WARNING = 1 << 9;
    const USER_NOTICE = 1 << 10;
    const STRICT = 1 << 11;
    const RECOVERABLE = 1 << 12;
    const DEPRECATED = 1 << 13;
    const USER_DEPRECATED = 1 << 14;
  }
}

impl Severity {
  /// Every known severity.
  pub const ALL: Self = Self::all();

  /// Severities that end the process and can only be observed at shutdown.
  pub const FATAL_SET: Self = Self::FATAL
    .union(Self::PARSE)
    .union(Self::CORE_FATAL)
    .union(Self::CORE_WARNING)
    .union(Self::COMPILE_FATAL)
    .union(Self::COMPILE_WARNING);

  /// Returns `true` if any of these severities is fatal.
  #[inline]
  pub const fn is_fatal(&self) -> bool {
    self.intersects(Self::FATAL_SET)
  }

  /// Returns the canonical display phrase of a single severity.
  ///
  /// Returns `None` for empty or combined masks and for unknown bits.
  pub const fn phrase(&self) -> Option<&'static str> {
    let phrase: &'static str = match self.bits() {
      bits if bits == Self::FATAL.bits() => "Fatal error",
      bits if bits == Self::PARSE.bits() => "Parse error",
      bits if bits == Self::CORE_FATAL.bits() => "Core error",
      bits if bits == Self::COMPILE_FATAL.bits() => "Compile error",
      bits if bits == Self::USER_FATAL.bits() => "User error",
      bits if bits == Self::NOTICE.bits() => "Notice",
      bits if bits == Self::DEPRECATED.bits() => "Deprecated",
      bits if bits == Self::USER_NOTICE.bits() => "User notice",
      bits if bits == Self::WARNING.bits() => "Warning",
      bits if bits == Self::USER_WARNING.bits() => "User warning",
      bits if bits == Self::CORE_WARNING.bits() => "Core warning",
      bits if bits == Self::COMPILE_WARNING.bits() => "Compile warning",
      bits if bits == Self::STRICT.bits() => "Strict message",
      bits if bits == Self::RECOVERABLE.bits() => "Recoverable error",
      bits if bits == Self::USER_DEPRECATED.bits() => "User deprecated",
      _ => return None,
    };

    Some(phrase)
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.phrase() {
      Some(phrase) => f.write_str(phrase),
      None => write!(f, "{:#x}", self.bits()),
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
