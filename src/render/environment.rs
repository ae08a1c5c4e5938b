use std::env;
use std::io;
use std::io::IsTerminal;

use crate::consts;

/// Facts about the current execution context, observed together.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct EnvironmentFacts {
  /// Running in an interactive terminal.
  pub cli: bool,
  /// Serving a programmatic (AJAX) client.
  pub ajax: bool,
}

/// Source of facts about the current execution context.
pub trait Environment: Send + Sync {
  /// Returns `true` if running in an interactive terminal.
  fn is_cli(&self) -> bool;

  /// Returns `true` if serving a programmatic (AJAX) client.
  fn is_ajax(&self) -> bool;

  /// Observes every fact once.
  #[inline]
  fn observe(&self) -> EnvironmentFacts {
    EnvironmentFacts {
      cli: self.is_cli(),
      ajax: self.is_ajax(),
    }
  }
}

// -----------------------------------------------------------------------------
// Static Environment
// -----------------------------------------------------------------------------

/// An environment with fixed facts.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct StaticEnvironment {
  facts: EnvironmentFacts,
}

impl StaticEnvironment {
  /// Creates an environment reporting the given facts.
  #[inline]
  pub const fn new(cli: bool, ajax: bool) -> Self {
    Self {
      facts: EnvironmentFacts { cli, ajax },
    }
  }
}

impl Environment for StaticEnvironment {
  #[inline]
  fn is_cli(&self) -> bool {
    self.facts.cli
  }

  #[inline]
  fn is_ajax(&self) -> bool {
    self.facts.ajax
  }

  #[inline]
  fn observe(&self) -> EnvironmentFacts {
    self.facts
  }
}

// -----------------------------------------------------------------------------
// Process Environment
// -----------------------------------------------------------------------------

/// Environment facts of the running process.
///
/// - cli: stderr is attached to a terminal
/// - ajax: the CGI variable `HTTP_X_REQUESTED_WITH` is `XMLHttpRequest`
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
  /// Creates a new `ProcessEnvironment`.
  #[inline]
  pub const fn new() -> Self {
    Self
  }
}

impl Environment for ProcessEnvironment {
  fn is_cli(&self) -> bool {
    io::stderr().is_terminal()
  }

  fn is_ajax(&self) -> bool {
    env::var(consts::AJAX_HEADER_VAR)
      .is_ok_and(|value| value.eq_ignore_ascii_case(consts::AJAX_HEADER_VALUE))
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
