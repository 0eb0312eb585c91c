//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the repository port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User store the handlers read from.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Bundle the user store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
