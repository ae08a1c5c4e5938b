//! Human-readable rendering of throwables.
//!
//! A [`Renderer`] turns a [`Throwable`] or a single stack [`Frame`] into
//! text. Renderers share the [`display_type`] resolution so every format
//! names a throwable the same way.
//!
//! # Renderers
//!
//! - [`PlaintextRenderer`]: Fixed-width text report
//! - [`EnvironmentAwareRenderer`]: Picks a renderer for the current
//!   execution context (terminal, programmatic client or default)
//!
//! [`Throwable`]: crate::throwable::Throwable
//! [`Frame`]: crate::throwable::Frame

mod display;
mod environment;
mod plaintext;
mod selector;

pub use self::display::display_type;
pub use self::environment::Environment;
pub use self::environment::EnvironmentFacts;
pub use self::environment::ProcessEnvironment;
pub use self::environment::StaticEnvironment;
pub use self::plaintext::PlaintextRenderer;
pub use self::plaintext::make_line;
pub use self::selector::EnvironmentAwareRenderer;

use crate::error::RenderError;
use crate::throwable::Frame;
use crate::throwable::Throwable;

/// A formatter of throwables and stack frames.
pub trait Renderer: Send + Sync {
  /// Renders `throwable`, including its call-stack.
  fn render(&self, throwable: &Throwable) -> Result<String, RenderError>;

  /// Renders a single stack frame.
  fn render_frame(&self, frame: &Frame) -> Result<String, RenderError>;
}
