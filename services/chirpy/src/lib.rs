//! Chirpy: a small social posting service
//!
//! The binary in `main.rs` wires these modules to PostgreSQL; tests drive the
//! same router against [`repositories::MemoryRepository`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod moderation;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod state;

pub use state::AppState;
