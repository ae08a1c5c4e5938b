use parking_lot::Mutex;
use std::io;
use std::io::Stderr;
use std::io::Write;
use std::sync::Arc;

use crate::error::BoxError;
use crate::render::Renderer;
use crate::responder::Responder;
use crate::throwable::Throwable;

/// Responder that renders each throwable and writes it to a sink.
pub struct RenderResponder<W> {
  renderer: Arc<dyn Renderer>,
  sink: Mutex<W>,
}

impl RenderResponder<Stderr> {
  /// Creates a responder writing renders to stderr.
  #[inline]
  pub fn stderr(renderer: Arc<dyn Renderer>) -> Self {
    Self::new(renderer, io::stderr())
  }
}

impl<W> RenderResponder<W>
where
  W: Write + Send,
{
  /// Creates a responder writing renders to `sink`.
  #[inline]
  pub fn new(renderer: Arc<dyn Renderer>, sink: W) -> Self {
    Self {
      renderer,
      sink: Mutex::new(sink),
    }
  }

  /// Consumes the responder, returning the sink.
  #[inline]
  pub fn into_sink(self) -> W {
    self.sink.into_inner()
  }
}

impl<W> Responder for RenderResponder<W>
where
  W: Write + Send,
{
  fn consider(&self, _throwable: &Throwable) -> bool {
    true
  }

  fn handle(&self, throwable: &Throwable) -> Result<(), BoxError> {
    let render: String = self.renderer.render(throwable)?;
    let mut sink: _ = self.sink.lock();

    sink.write_all(render.as_bytes())?;
    sink.flush()?;

    Ok(())
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
