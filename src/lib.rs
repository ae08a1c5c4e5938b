//! Errwatch - interception and reporting of runtime failures.
//!
//! Errwatch listens for failure signals raised by a host process (runtime
//! errors, uncaught panics and fatal errors observed at shutdown), turns
//! them into a single [`Throwable`] representation, and hands each one to
//! an ordered chain of pluggable responders. Renderers turn throwables into
//! text suited to where the process runs.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use errwatch::listener::{HookSet, Listener, ListenerConfig, ProcessHost};
//! use errwatch::render::PlaintextRenderer;
//! use errwatch::responder::{RenderResponder, TracingResponder};
//! use errwatch::throwable::Severity;
//!
//! let host: Arc<ProcessHost> = Arc::new(ProcessHost::new());
//! let _guard = host.guard();
//!
//! let listener: Arc<Listener> = Arc::new(Listener::new(
//!   host.clone(),
//!   vec![
//!     Arc::new(TracingResponder::new()),
//!     Arc::new(RenderResponder::stderr(Arc::new(PlaintextRenderer::default()))),
//!   ],
//!   ListenerConfig::new().with_override(true),
//! ));
//!
//! listener.listen(HookSet::ALL);
//!
//! host.raise(Severity::USER_WARNING, "disk almost full").unwrap();
//! ```
//!
//! # Core Modules
//!
//! - [`listener`]: Hook activation, normalization and dispatch
//! - [`responder`]: Responder contract and provided responders
//! - [`render`]: Renderers and environment-aware renderer selection
//! - [`throwable`]: Normalized failure model
//! - [`error`]: Dispatch and render failures
//! - [`consts`]: Default configuration values
//!
//! [`Throwable`]: crate::throwable::Throwable

mod loom;
mod utils;

pub mod consts;
pub mod error;
pub mod listener;
pub mod render;
pub mod responder;
pub mod throwable;
