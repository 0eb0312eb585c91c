//! Admin users API.
//!
//! A small REST service exposing administrator user records stored in
//! PostgreSQL (or in memory under `TEST_MODE`). The crate is laid out as
//! ports and adapters: [`domain`] holds the entity and the repository
//! contract, [`outbound`] the storage adapters, [`inbound`] the HTTP
//! handlers, and [`middleware`] the request chain wrapped around them.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface served at `/docs/openapi.json`.
pub use doc::ApiDoc;
