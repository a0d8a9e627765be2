//! Database layer
//!
//! Provides connection management, typed models, and repositories for
//! users, sources, notes, and chat history.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{DatabaseConnection, DatabasePool};
pub use error::{DatabaseError, DbResult};
