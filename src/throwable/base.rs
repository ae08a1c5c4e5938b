use std::any::Any;
use std::any::type_name;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::panic::Location;
use std::panic::PanicHookInfo;

use crate::consts;
use crate::error::NoResponder;
use crate::throwable::Category;
use crate::throwable::Frame;
use crate::throwable::Severity;
use crate::throwable::Stack;

/// Normalized representation of an intercepted failure.
///
/// A `Throwable` is immutable once constructed.
///
/// # Display Format
///
/// Throwables format as: `{type}: {message} in {file}:{line}`
#[derive(Clone, Debug)]
pub struct Throwable {
  category: Category,
  type_name: Cow<'static, str>,
  message: String,
  code: i64,
  file: String,
  line: u32,
  stack: Stack,
  unanswered: bool,
}

impl Throwable {
  /// Creates a runtime error with the given severity and origin.
  pub fn error<M, F>(severity: Severity, message: M, file: F, line: u32) -> Self
  where
    M: Into<String>,
    F: Into<String>,
  {
    Self::with_category(Category::Error(severity), message, file, line)
  }

  /// Creates a fatal error observed at process end.
  pub fn shutdown<M, F>(severity: Severity, message: M, file: F, line: u32) -> Self
  where
    M: Into<String>,
    F: Into<String>,
  {
    Self::with_category(Category::Shutdown(severity), message, file, line)
  }

  /// Creates an exception of the named type.
  pub fn exception<T, M, F>(type_name: T, message: M, file: F, line: u32) -> Self
  where
    T: Into<Cow<'static, str>>,
    M: Into<String>,
    F: Into<String>,
  {
    Self::with_category(Category::Exception, message, file, line).with_type_name(type_name)
  }

  /// Creates an exception from an error value.
  ///
  /// The type name is the qualified name of `E` and the origin is the
  /// caller's location. The stack is captured at the call site.
  #[track_caller]
  pub fn from_error<E>(error: &E) -> Self
  where
    E: Error + ?Sized + 'static,
  {
    let location: &Location<'static> = Location::caller();

    Self::exception(type_name::<E>(), error.to_string(), location.file(), location.line())
      .with_stack(Stack::capture())
  }

  /// Creates an exception from a panic.
  pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
    let message: String = panic_message(info.payload());

    let (file, line): (&str, u32) = match info.location() {
      Some(location) => (location.file(), location.line()),
      None => (consts::UNKNOWN_FILE, 0),
    };

    Self::exception("core::panic::Panic", message, file, line).with_stack(Stack::capture())
  }

  fn with_category<M, F>(category: Category, message: M, file: F, line: u32) -> Self
  where
    M: Into<String>,
    F: Into<String>,
  {
    Self {
      category,
      type_name: Cow::Borrowed(category.type_name()),
      message: message.into(),
      code: 0,
      file: file.into(),
      line,
      stack: Stack::new(),
      unanswered: false,
    }
  }

  /// Sets the numeric code of this throwable.
  #[inline]
  pub fn with_code(mut self, code: i64) -> Self {
    self.code = code;
    self
  }

  /// Sets the call-stack of this throwable.
  #[inline]
  pub fn with_stack<S>(mut self, stack: S) -> Self
  where
    S: Into<Stack>,
  {
    self.stack = stack.into();
    self
  }

  /// Sets the qualified type name of this throwable.
  #[inline]
  pub fn with_type_name<T>(mut self, type_name: T) -> Self
  where
    T: Into<Cow<'static, str>>,
  {
    self.type_name = type_name.into();
    self
  }

  /// Returns the classification of this throwable.
  #[inline]
  pub const fn category(&self) -> Category {
    self.category
  }

  /// Returns the severity tag, if the category carries one.
  #[inline]
  pub const fn severity(&self) -> Option<Severity> {
    self.category.severity()
  }

  /// Returns the fully-qualified type name.
  #[inline]
  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  /// Returns the human-readable message.
  #[inline]
  pub fn message(&self) -> &str {
    self.message.as_str()
  }

  /// Returns the numeric code.
  #[inline]
  pub const fn code(&self) -> i64 {
    self.code
  }

  /// Returns the file the failure originated in.
  #[inline]
  pub fn file(&self) -> &str {
    self.file.as_str()
  }

  /// Returns the line the failure originated on.
  #[inline]
  pub const fn line(&self) -> u32 {
    self.line
  }

  /// Returns the call-stack, innermost call first.
  #[inline]
  pub fn stack(&self) -> &[Frame] {
    self.stack.frames()
  }

  /// Returns `true` if this throwable reports a dispatch that found no
  /// responder.
  ///
  /// Dispatching such a throwable terminates the process.
  #[inline]
  pub const fn is_unanswered(&self) -> bool {
    self.unanswered
  }
}

impl Display for Throwable {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    write!(f, "{}: {} in {}:{}", self.type_name, self.message, self.file, self.line)
  }
}

impl From<NoResponder> for Throwable {
  #[track_caller]
  fn from(other: NoResponder) -> Self {
    let location: &Location<'static> = Location::caller();

    Self {
      category: Category::Exception,
      type_name: Cow::Borrowed(type_name::<NoResponder>()),
      message: other.message().to_owned(),
      code: other.code(),
      file: location.file().to_owned(),
      line: location.line(),
      stack: Stack::new(),
      unanswered: true,
    }
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    (*message).to_owned()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    String::from("Box<dyn Any>")
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
