use std::borrow::Cow;

use crate::error::RenderError;
use crate::throwable::Throwable;

/// Returns the name a throwable is displayed under.
///
/// Throwables carrying a severity (runtime and shutdown errors) are named by
/// their severity phrase, e.g. `"User warning"`. Anything else is named by
/// its qualified type name, reduced to the last path segment when `shorten`
/// is set.
///
/// # Errors
///
/// Returns [`RenderError::UnknownSeverity`] if the severity is not exactly
/// one known flag.
pub fn display_type(throwable: &Throwable, shorten: bool) -> Result<Cow<'_, str>, RenderError> {
  if let Some(severity) = throwable.severity() {
    return severity
      .phrase()
      .map(Cow::Borrowed)
      .ok_or(RenderError::UnknownSeverity(severity.bits()));
  }

  let name: &str = throwable.type_name();

  if shorten && let Some((_, short)) = name.rsplit_once("::") {
    return Ok(Cow::Borrowed(short));
  }

  Ok(Cow::Borrowed(name))
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
