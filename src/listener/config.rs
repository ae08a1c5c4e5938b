use crate::consts;
use crate::throwable::Severity;

/// Listener configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerConfig {
  /// Severities of runtime errors the listener reacts to.
  pub mode: Severity,
  /// Whether the host's native reporting is suppressed after handling.
  pub override_native: bool,
}

impl ListenerConfig {
  #[inline]
  pub const fn new() -> Self {
    Self {
      mode: consts::DEFAULT_MODE,
      override_native: consts::DEFAULT_OVERRIDE,
    }
  }

  #[inline]
  pub const fn with_mode(mut self, mode: Severity) -> Self {
    self.mode = mode;
    self
  }

  #[inline]
  pub const fn with_override(mut self, override_native: bool) -> Self {
    self.override_native = override_native;
    self
  }
}

impl Default for ListenerConfig {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
