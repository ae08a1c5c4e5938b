use crate::throwable::Severity;

// -----------------------------------------------------------------------------
// Listener
// -----------------------------------------------------------------------------

/// Severities the listener reacts to unless configured otherwise.
pub const DEFAULT_MODE: Severity = Severity::ALL;

/// Whether the listener suppresses native host reporting by default.
pub const DEFAULT_OVERRIDE: bool = false;

// -----------------------------------------------------------------------------
// Plaintext Rendering
// -----------------------------------------------------------------------------

/// Width (in characters) of the outer divider of a plaintext render.
pub const DEFAULT_MAX_WIDTH: usize = 75;

/// Fill character of the outer divider.
pub const OUTER_DIVIDER: char = '=';

/// Fill character of the inner divider and frame label lines.
pub const INNER_DIVIDER: char = '-';

// -----------------------------------------------------------------------------
// Environment Detection
// -----------------------------------------------------------------------------

/// CGI variable carrying the `X-Requested-With` request header.
pub const AJAX_HEADER_VAR: &str = "HTTP_X_REQUESTED_WITH";

/// Header value sent by programmatic (AJAX) clients.
pub const AJAX_HEADER_VALUE: &str = "XMLHttpRequest";

// -----------------------------------------------------------------------------
// Stack Capture
// -----------------------------------------------------------------------------

/// File name recorded for frames without source location.
pub const UNKNOWN_FILE: &str = "[internal]";
