use std::borrow::Cow;
use std::fmt::Write;

use crate::consts;
use crate::error::RenderError;
use crate::render::Renderer;
use crate::render::display_type;
use crate::throwable::Frame;
use crate::throwable::Throwable;

/// Renders throwables as fixed-width plaintext.
///
/// # Format
///
/// ```text
/// ===========================================================================
/// Failure
/// -------
/// something went wrong
///
/// #0 ------------------------------------------------------------------------
/// File:  src/main.rs
/// Line:  10
/// Calls: app::main
///
/// ===========================================================================
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PlaintextRenderer {
  max_width: usize,
}

impl PlaintextRenderer {
  /// Creates a renderer with the given divider width.
  #[inline]
  pub const fn new(max_width: usize) -> Self {
    Self { max_width }
  }

  /// Returns the width of the outer divider.
  #[inline]
  pub const fn max_width(&self) -> usize {
    self.max_width
  }
}

impl Default for PlaintextRenderer {
  #[inline]
  fn default() -> Self {
    Self::new(consts::DEFAULT_MAX_WIDTH)
  }
}

impl Renderer for PlaintextRenderer {
  fn render(&self, throwable: &Throwable) -> Result<String, RenderError> {
    let kind: Cow<'_, str> = display_type(throwable, true)?;
    let outer: String = make_line("", consts::OUTER_DIVIDER, self.max_width);
    let inner: String = make_line("", consts::INNER_DIVIDER, self.max_width.min(kind.chars().count()));

    let mut output: String = String::new();

    output.push_str(&outer);
    output.push('\n');
    output.push_str(&kind);
    output.push('\n');
    output.push_str(&inner);
    output.push('\n');
    output.push_str(throwable.message());
    output.push_str("\n\n");

    for (index, frame) in throwable.stack().iter().enumerate() {
      let label: String = format!("#{index} ");

      output.push_str(&make_line(&label, consts::INNER_DIVIDER, self.max_width));
      output.push('\n');
      output.push_str(&self.render_frame(frame)?);
      output.push_str("\n\n");
    }

    output.push_str(&outer);
    output.push('\n');

    Ok(output)
  }

  fn render_frame(&self, frame: &Frame) -> Result<String, RenderError> {
    let mut output: String = String::new();

    // Writing into a `String` cannot fail.
    let _ignore: std::fmt::Result = write!(
      output,
      "File:  {}\nLine:  {}\nCalls: {}",
      frame.file(),
      frame.line(),
      frame.function(),
    );

    Ok(output)
  }
}

/// Right-pads `label` with `fill` until it is `len` characters long.
///
/// An empty label yields a plain divider. Labels already `len` characters
/// or longer are returned unchanged.
pub fn make_line(label: &str, fill: char, len: usize) -> String {
  let count: usize = label.chars().count();
  let mut line: String = String::with_capacity(len.max(label.len()));

  line.push_str(label);
  line.extend(std::iter::repeat_n(fill, len.saturating_sub(count)));
  line
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
