//! Process-local storage adapters.
//!
//! Used when the service runs in test mode and by suites that exercise the
//! repository contract without a database.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
