//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature so the
//! integration suites can reach it without shipping it in release builds.

mod stub_user_repository;

pub use stub_user_repository::StubUserRepository;
