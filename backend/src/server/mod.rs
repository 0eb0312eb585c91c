//! Server construction and middleware wiring.
//!
//! [`build_app`] assembles routes, shared state and the middleware chain;
//! [`create_server`] binds it with the listener timeouts. Both take the
//! repository as a trait object so the binary and the test suites share the
//! same wiring.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::config::{AdminConfig, ConfigError, DB_URI_ENV, ServerSettings};
use crate::domain::ports::UserRepository;
use crate::inbound::http::docs::openapi_json;
use crate::inbound::http::home::home;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::middleware::standard_chain;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, PoolError};

/// Time allowed for a client to send the request head.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
/// Time allowed for a client to drain the response before the connection is dropped.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);
/// Idle keep-alive window between requests.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that abort startup.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The listener could not be bound or served.
    #[error("failed to start HTTP server: {0}")]
    Io(#[from] std::io::Error),
}

/// Select the user store for `config`.
///
/// Test mode serves from memory; otherwise a PostgreSQL pool is built and a
/// connection is checked out before returning.
///
/// # Errors
///
/// Returns [`StartupError::Pool`] when the database cannot be reached and
/// [`StartupError::Config`] when no database URI is configured.
pub async fn connect_repository(
    config: &AdminConfig,
) -> Result<Arc<dyn UserRepository>, StartupError> {
    if config.app.test_mode {
        info!("test mode enabled; serving users from memory");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    }
    let uri = config
        .database
        .uri
        .as_deref()
        .ok_or(ConfigError::MissingEnv { name: DB_URI_ENV })?;
    let pool = DbPool::connect(PoolConfig::new(uri)).await?;
    Ok(Arc::new(DieselUserRepository::new(pool)))
}

/// Build the application around `state`.
///
/// Routes sit behind the standard middleware chain: request trace, trailing
/// slash trim, request log.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(standard_chain())
        .service(home)
        .configure(users::configure)
        .service(openapi_json)
}

/// Construct an Actix HTTP server bound to `settings`.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    settings: &ServerSettings,
    users: Arc<dyn UserRepository>,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::new(users));
    let server = HttpServer::new(move || build_app(state.clone()))
        .client_request_timeout(READ_TIMEOUT)
        .client_disconnect_timeout(WRITE_TIMEOUT)
        .keep_alive(IDLE_TIMEOUT)
        .bind((settings.address.as_str(), settings.port))?
        .run();

    info!(address = %settings.address, port = settings.port, "listening");
    Ok(server)
}
