//! Energy assistant API: library crate for the intent resolution server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ea-e2e-tests`) can build the router and state directly.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
