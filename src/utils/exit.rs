use std::fmt::Display;
use std::io;
use std::io::StderrLock;
use std::io::Write;
use std::process;

/// Status code the current process returns to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(transparent)]
pub(crate) struct ExitCode(u8);

impl ExitCode {
  /// The canonical `ExitCode` for unsuccessful termination on this platform.
  pub(crate) const FAILURE: ExitCode = ExitCode(libc::EXIT_FAILURE as u8);

  /// Prints `message` to stderr and exits the current process.
  #[cold]
  pub(crate) fn exit_with<T>(self, message: T) -> !
  where
    T: Display,
  {
    let mut stderr: StderrLock<'static> = io::stderr().lock();

    // Nothing is left to report a failed write to.
    let _ignore: io::Result<()> = writeln!(stderr, "{message}");
    let _ignore: io::Result<()> = stderr.flush();

    self.exit_process()
  }

  /// Exit the current process with the given `ExitCode`.
  #[inline]
  pub(crate) fn exit_process(self) -> ! {
    process::exit(self.to_i32())
  }

  #[inline]
  pub(crate) fn to_i32(self) -> i32 {
    self.0 as i32
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
