//! GreenThumb Advisory API — library crate for the request boundary.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `gt-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and `AdvisoryEngine`.

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod routes;
pub mod state;
pub mod transport;
pub mod validate;
pub mod weather;
