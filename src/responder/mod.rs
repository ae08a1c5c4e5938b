//! Responder contract and the responders shipped with the crate.
//!
//! A [`Responder`] reacts to throwables dispatched by a [`Listener`]. The
//! listener treats all responders uniformly: for every dispatch it calls
//! [`consider`] then [`handle`] on each one, in registration order.
//!
//! # Provided Responders
//!
//! - [`TracingResponder`]: Emits a `tracing` event per throwable
//! - [`RenderResponder`]: Renders throwables and writes them to a sink
//!
//! [`Listener`]: crate::listener::Listener
//! [`consider`]: Responder::consider
//! [`handle`]: Responder::handle

mod log;
mod render;

pub use self::log::TracingResponder;
pub use self::render::RenderResponder;

use crate::error::BoxError;
use crate::throwable::Throwable;

/// A pluggable reaction to a dispatched throwable.
pub trait Responder: Send + Sync {
  /// Returns `true` if this responder is interested in `throwable`.
  ///
  /// This should be free of side effects. The listener reports the result
  /// but invokes [`handle`] either way.
  ///
  /// [`handle`]: Responder::handle
  fn consider(&self, throwable: &Throwable) -> bool;

  /// Performs the responder's effect for `throwable`.
  fn handle(&self, throwable: &Throwable) -> Result<(), BoxError>;
}
