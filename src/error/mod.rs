//! Failure conditions raised by the listener and the renderers.
//!
//! # Dispatch Failures
//!
//! - [`NoResponder`]: a throwable was dispatched but no responder is
//!   registered. This is a configuration error and is always surfaced to
//!   the caller. Converting it into a [`Throwable`] marks the result as
//!   unanswered; dispatching that throwable terminates the process instead
//!   of raising another `NoResponder`.
//! - [`DispatchError::Responder`]: a responder failed to handle a
//!   throwable. The rest of the chain is skipped.
//!
//! # Render Failures
//!
//! - [`RenderError::NoRenderer`]: no renderer applies to the current
//!   environment.
//! - [`RenderError::UnknownSeverity`]: a severity tag has no display phrase.
//!
//! [`Throwable`]: crate::throwable::Throwable

mod dispatch;
mod render;

pub use self::dispatch::DispatchError;
pub use self::dispatch::NoResponder;
pub use self::render::NoRendererContext;
pub use self::render::RenderError;

/// Boxed error returned by responders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
