//! Request middleware.
//!
//! Purpose: compose cross-cutting request concerns (trace identifiers, path
//! normalisation and access logging) around the application through one
//! ordered [`Chain`].

pub mod chain;
pub mod request_log;
pub mod trace;
pub mod trailing_slash;

use std::rc::Rc;

pub use chain::{Chain, ChainMiddleware, Middleware, Next};
pub use request_log::RequestLog;
pub use trace::RequestTrace;
pub use trailing_slash::{RequestTarget, TrimTrailingSlash};

/// The chain the server installs: trace, then trim, then log.
///
/// The log runs inside the trace scope and reports the request target as the
/// client sent it, before trimming.
pub fn standard_chain() -> Chain {
    Chain::new(vec![
        Rc::new(RequestTrace),
        Rc::new(TrimTrailingSlash),
        Rc::new(RequestLog),
    ])
}
