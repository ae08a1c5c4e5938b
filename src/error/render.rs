use thiserror::Error;

use crate::throwable::Throwable;

/// Throwable that was being rendered when no renderer applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoRendererContext {
  pub message: String,
  pub code: i64,
}

impl NoRendererContext {
  #[inline]
  pub(crate) fn new(throwable: &Throwable) -> Self {
    Self {
      message: throwable.message().to_owned(),
      code: throwable.code(),
    }
  }
}

/// Error returned from [`Renderer`] operations.
///
/// [`Renderer`]: crate::render::Renderer
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
  /// No renderer is configured for the current environment.
  ///
  /// `context` is set when a throwable (rather than a bare frame) was
  /// being rendered.
  #[error("no renderer is configured")]
  NoRenderer { context: Option<NoRendererContext> },
  /// A severity tag has no display phrase.
  #[error("unknown severity: {0:#x}")]
  UnknownSeverity(u32),
}

impl RenderError {
  /// Returns the code of the throwable being rendered, if any.
  #[inline]
  pub fn code(&self) -> Option<i64> {
    match self {
      Self::NoRenderer { context } => context.as_ref().map(|context| context.code),
      Self::UnknownSeverity(_) => None,
    }
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
