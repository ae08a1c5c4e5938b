use std::backtrace::Backtrace;
use std::backtrace::BacktraceStatus;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::ops::Deref;

use crate::consts;

// -----------------------------------------------------------------------------
// Frame
// -----------------------------------------------------------------------------

/// One entry of a call-stack.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Frame {
  file: String,
  line: u32,
  function: String,
  owner: Option<String>,
}

impl Frame {
  /// Creates a new frame for a call of `function` at `file:line`.
  pub fn new<F, N>(file: F, line: u32, function: N) -> Self
  where
    F: Into<String>,
    N: Into<String>,
  {
    Self {
      file: file.into(),
      line,
      function: function.into(),
      owner: None,
    }
  }

  /// Sets the type enclosing the invoked function.
  pub fn with_owner<T>(mut self, owner: T) -> Self
  where
    T: Into<String>,
  {
    self.owner = Some(owner.into());
    self
  }

  /// Returns the source file of the call.
  #[inline]
  pub fn file(&self) -> &str {
    self.file.as_str()
  }

  /// Returns the source line of the call.
  #[inline]
  pub const fn line(&self) -> u32 {
    self.line
  }

  /// Returns the name of the invoked function.
  #[inline]
  pub fn function(&self) -> &str {
    self.function.as_str()
  }

  /// Returns the type enclosing the invoked function, if known.
  #[inline]
  pub fn owner(&self) -> Option<&str> {
    self.owner.as_deref()
  }
}

impl Display for Frame {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self.owner.as_deref() {
      Some(owner) => write!(f, "{owner}::{} ({}:{})", self.function, self.file, self.line),
      None => write!(f, "{} ({}:{})", self.function, self.file, self.line),
    }
  }
}

// -----------------------------------------------------------------------------
// Stack
// -----------------------------------------------------------------------------

/// An ordered call-stack, innermost call first.
///
/// The frames are fixed when the stack is created.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Stack {
  frames: Vec<Frame>,
}

impl Stack {
  /// Creates an empty stack.
  #[inline]
  pub const fn new() -> Self {
    Self { frames: Vec::new() }
  }

  /// Captures the stack of the calling thread.
  ///
  /// Capture follows the `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` environment
  /// variables; the stack is empty when capture is disabled.
  pub fn capture() -> Self {
    Self::from_backtrace(&Backtrace::capture())
  }

  /// Builds a stack from a captured [`Backtrace`].
  ///
  /// Frames belonging to the capture machinery itself are skipped.
  pub fn from_backtrace(trace: &Backtrace) -> Self {
    if trace.status() != BacktraceStatus::Captured {
      return Self::new();
    }

    Self {
      frames: caller_frames(&trace.to_string()),
    }
  }

  /// Returns the frames of this stack.
  #[inline]
  pub fn frames(&self) -> &[Frame] {
    self.frames.as_slice()
  }
}

impl Deref for Stack {
  type Target = [Frame];

  #[inline]
  fn deref(&self) -> &Self::Target {
    self.frames.as_slice()
  }
}

impl From<Vec<Frame>> for Stack {
  #[inline]
  fn from(frames: Vec<Frame>) -> Self {
    Self { frames }
  }
}

impl FromIterator<Frame> for Stack {
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Frame>,
  {
    Self {
      frames: iter.into_iter().collect(),
    }
  }
}

impl<'a> IntoIterator for &'a Stack {
  type Item = &'a Frame;
  type IntoIter = std::slice::Iter<'a, Frame>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.frames.iter()
  }
}

// -----------------------------------------------------------------------------
// Backtrace Parsing
// -----------------------------------------------------------------------------

/// Parses the display form of a captured backtrace:
///
/// ```text
///    0: app::module::function
///              at ./src/module.rs:10:5
/// ```
fn parse(trace: &str) -> Vec<Frame> {
  let mut frames: Vec<Frame> = Vec::new();

  for line in trace.lines().map(str::trim) {
    if let Some(location) = line.strip_prefix("at ") {
      let Some(frame) = frames.last_mut() else {
        continue;
      };

      if let Some((file, number)) = split_location(location) {
        frame.file = file.to_owned();
        frame.line = number;
      }
    } else if let Some((index, symbol)) = line.split_once(": ")
      && !index.is_empty()
      && index.bytes().all(|byte| byte.is_ascii_digit())
    {
      frames.push(symbol_frame(symbol));
    }
  }

  frames
}

/// Parses `trace`, dropping the leading frames of the capture machinery and
/// of errwatch's own interception path.
fn caller_frames(trace: &str) -> Vec<Frame> {
  parse(trace)
    .into_iter()
    .skip_while(|frame| is_capture_frame(frame.function()))
    .collect()
}

/// Splits `path:line:column` into `(path, line)`.
fn split_location(location: &str) -> Option<(&str, u32)> {
  let mut parts = location.rsplitn(3, ':');
  let _column: &str = parts.next()?;
  let line: u32 = parts.next()?.parse().ok()?;
  let file: &str = parts.next()?;

  Some((file, line))
}

fn symbol_frame(symbol: &str) -> Frame {
  let symbol: &str = strip_hash(symbol);

  let frame: Frame = Frame::new(consts::UNKNOWN_FILE, 0, symbol);

  match owner_of(symbol) {
    Some(owner) => frame.with_owner(owner),
    None => frame,
  }
}

/// Removes the trailing `::h<16 hex digits>` symbol hash, if present.
fn strip_hash(symbol: &str) -> &str {
  match symbol.rsplit_once("::h") {
    Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => head,
    _ => symbol,
  }
}

/// Guesses the enclosing type of a demangled symbol path.
///
/// Type segments are recognized by their upper camel case name, or by
/// trait-qualified paths of the form `<Type as Trait>::method`.
fn owner_of(symbol: &str) -> Option<&str> {
  if let Some(qualified) = symbol.strip_prefix('<')
    && let Some((owner, _)) = qualified.split_once(" as ")
  {
    return Some(owner);
  }

  let (path, _function) = symbol.rsplit_once("::")?;
  let segment: &str = path.rsplit("::").next()?;

  segment
    .chars()
    .next()
    .filter(char::is_ascii_uppercase)
    .map(|_| segment)
}

fn is_capture_frame(function: &str) -> bool {
  const INTERNAL: &[&str] = &["errwatch::throwable::", "errwatch::listener::"];

  function.contains("backtrace")
    || INTERNAL.iter().any(|prefix| {
      function.starts_with(prefix)
        || function.strip_prefix('<').is_some_and(|function| function.starts_with(prefix))
    })
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
