/// Client-side flows and the reusable state machinery under them.
///
/// `fetch`, `selection`, `setup`, and `session` are the generic pieces; the
/// remaining modules are the per-screen flows composed from them.
pub mod account;
pub mod browse;
pub mod detail;
pub mod fetch;
pub mod profile;
pub mod search;
pub mod selection;
pub mod session;
pub mod setup;
