//! Client engine for the PopcornPick movie-recommendation service.
//!
//! Everything non-trivial (ranking, persistence, authentication) happens
//! behind the remote JSON API. This crate owns what the client itself has to
//! get right: the account-setup wizard, reactive fetch coordination with
//! last-input-wins semantics, selection sets, the session gate, and typed
//! access to every endpoint. It is headless: flows expose state, the
//! embedding UI renders it.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

/// Installs a global tracing subscriber honoring `RUST_LOG`. Call once from
/// the embedding application; repeated calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
