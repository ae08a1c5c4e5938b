//! Normalized failure model.
//!
//! Every intercepted signal, whether a runtime error raised by the host, a
//! panic escaping program handling, or a fatal error observed at process end,
//! becomes a [`Throwable`] before it is dispatched.
//!
//! A throwable carries:
//!
//! 1. **Category**: how the failure was observed ([`Category`])
//! 2. **Severity**: a bitmask tag for error categories ([`Severity`])
//! 3. **Origin**: the file and line the failure was raised at
//! 4. **Stack**: the call-stack, innermost call first ([`Stack`])

mod base;
mod category;
mod frame;
mod severity;

pub use self::base::Throwable;
pub use self::category::Category;
pub use self::frame::Frame;
pub use self::frame::Stack;
pub use self::severity::Severity;
