use std::sync::Arc;
use tracing::trace;

use crate::error::NoRendererContext;
use crate::error::RenderError;
use crate::render::Environment;
use crate::render::EnvironmentFacts;
use crate::render::Renderer;
use crate::throwable::Frame;
use crate::throwable::Throwable;

/// Renders with the renderer best suited to the current environment.
///
/// # Selection
///
/// Every call observes the environment once and picks, in this order:
///
/// 1. the cli renderer, if running in a terminal
/// 2. the ajax renderer, if serving a programmatic client
/// 3. the default renderer
///
/// A role without a configured renderer is skipped. If nothing applies the
/// call fails with [`RenderError::NoRenderer`].
pub struct EnvironmentAwareRenderer {
  environment: Arc<dyn Environment>,
  cli: Option<Arc<dyn Renderer>>,
  ajax: Option<Arc<dyn Renderer>>,
  default: Option<Arc<dyn Renderer>>,
}

impl EnvironmentAwareRenderer {
  /// Creates a selector without any renderers.
  #[inline]
  pub fn new(environment: Arc<dyn Environment>) -> Self {
    Self {
      environment,
      cli: None,
      ajax: None,
      default: None,
    }
  }

  /// Sets the renderer used in interactive terminals.
  #[inline]
  pub fn with_cli_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
    self.set_cli_renderer(renderer);
    self
  }

  /// Sets the renderer used for programmatic (AJAX) clients.
  #[inline]
  pub fn with_ajax_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
    self.set_ajax_renderer(renderer);
    self
  }

  /// Sets the renderer used when no more specific renderer applies.
  #[inline]
  pub fn with_default_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
    self.set_default_renderer(renderer);
    self
  }

  /// Replaces the renderer used in interactive terminals.
  #[inline]
  pub fn set_cli_renderer(&mut self, renderer: Arc<dyn Renderer>) {
    self.cli = Some(renderer);
  }

  /// Replaces the renderer used for programmatic (AJAX) clients.
  #[inline]
  pub fn set_ajax_renderer(&mut self, renderer: Arc<dyn Renderer>) {
    self.ajax = Some(renderer);
  }

  /// Replaces the fallback renderer.
  #[inline]
  pub fn set_default_renderer(&mut self, renderer: Arc<dyn Renderer>) {
    self.default = Some(renderer);
  }

  /// Selects the renderer for the current environment.
  ///
  /// `throwable` is attached to the error when nothing applies.
  fn select(&self, throwable: Option<&Throwable>) -> Result<&dyn Renderer, RenderError> {
    let facts: EnvironmentFacts = self.environment.observe();

    let (role, renderer): (&str, &Arc<dyn Renderer>) = match (&self.cli, &self.ajax, &self.default) {
      (Some(cli), _, _) if facts.cli => ("cli", cli),
      (_, Some(ajax), _) if facts.ajax => ("ajax", ajax),
      (_, _, Some(default)) => ("default", default),
      _ => {
        return Err(RenderError::NoRenderer {
          context: throwable.map(NoRendererContext::new),
        });
      }
    };

    trace!(target: "errwatch", role, cli = facts.cli, ajax = facts.ajax, "renderer selected");

    Ok(renderer.as_ref())
  }
}

impl Renderer for EnvironmentAwareRenderer {
  fn render(&self, throwable: &Throwable) -> Result<String, RenderError> {
    self.select(Some(throwable))?.render(throwable)
  }

  fn render_frame(&self, frame: &Frame) -> Result<String, RenderError> {
    self.select(None)?.render_frame(frame)
  }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
